//! Wires [`DropZoneBinding`]s to page elements.

use wasm_bindgen::JsCast;
use web_sys::{Document, DragEvent, Element, Event, FileList, HtmlElement, HtmlInputElement};

use crate::ui::dropzone::{DropZoneBinding, HIGHLIGHT_CLASS, ZoneEffect, ZoneEvent};

use super::dom::element;
use super::events::EventBindings;

/// Bind one zone. Returns `false` when its zone or input is not on the page.
pub fn bind(events: &mut EventBindings, document: &Document, binding: DropZoneBinding) -> bool {
    let Some(zone) = element::<HtmlElement>(document, binding.zone_id) else {
        return false;
    };
    let Some(input) = element::<HtmlInputElement>(document, binding.input_id) else {
        return false;
    };
    let label = document.get_element_by_id(binding.label_id);
    let parts = ZoneParts { zone, input, label };

    for name in ["dragover", "dragleave", "drop", "click"] {
        let target = parts.zone.clone();
        let parts = parts.clone();
        events.listen(&target, name, move |event: Event| {
            let dropped = dropped_files(&event);
            let names = dropped.as_ref().map(file_names).unwrap_or_default();
            let zone_event = match name {
                "dragover" => ZoneEvent::DragOver,
                "dragleave" => ZoneEvent::DragLeave,
                "drop" => ZoneEvent::Drop(&names),
                _ => ZoneEvent::Click,
            };
            parts.apply(&event, binding.handle(zone_event), dropped.as_ref());
        });
    }

    let input_target = parts.input.clone();
    events.listen(&input_target, "change", move |event: Event| {
        let names = parts.input.files().as_ref().map(file_names).unwrap_or_default();
        parts.apply(&event, binding.handle(ZoneEvent::Selected(&names)), None);
    });

    true
}

#[derive(Clone)]
struct ZoneParts {
    zone: HtmlElement,
    input: HtmlInputElement,
    label: Option<Element>,
}

impl ZoneParts {
    fn apply(&self, event: &Event, effects: Vec<ZoneEffect>, dropped: Option<&FileList>) {
        for effect in effects {
            match effect {
                ZoneEffect::PreventDefault => {
                    event.prevent_default();
                    event.stop_propagation();
                }
                ZoneEffect::SetHighlight(true) => {
                    let _ = self.zone.class_list().add_1(HIGHLIGHT_CLASS);
                }
                ZoneEffect::SetHighlight(false) => {
                    let _ = self.zone.class_list().remove_1(HIGHLIGHT_CLASS);
                }
                ZoneEffect::AssignDroppedFiles => self.input.set_files(dropped),
                ZoneEffect::SetLabel(text) => {
                    if let Some(label) = &self.label {
                        label.set_text_content(Some(&text));
                    }
                }
                ZoneEffect::OpenFileDialog => self.input.click(),
            }
        }
    }
}

fn dropped_files(event: &Event) -> Option<FileList> {
    event.dyn_ref::<DragEvent>()?.data_transfer()?.files()
}

fn file_names(files: &FileList) -> Vec<String> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(|f| f.name())
        .collect()
}
