//! Drag-and-drop file selection with a click-to-browse fallback.

/// CSS class toggled on a zone while a drag hovers it.
pub const HIGHLIGHT_CLASS: &str = "dragover";

/// How the label element reports the chosen file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Just the file name.
    Bare,
    /// `Selected: <name>`.
    Selected,
}

impl LabelStyle {
    fn render(self, name: &str) -> String {
        match self {
            Self::Bare => name.to_string(),
            Self::Selected => format!("Selected: {name}"),
        }
    }
}

/// A (zone, file input, label) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropZoneBinding {
    pub zone_id: &'static str,
    pub input_id: &'static str,
    pub label_id: &'static str,
    pub label_style: LabelStyle,
}

/// Zones on the schedule checker page.
pub const CHECK_ZONES: [DropZoneBinding; 2] = [
    DropZoneBinding {
        zone_id: "timetable-zone",
        input_id: "timetable",
        label_id: "timetable-name",
        label_style: LabelStyle::Bare,
    },
    DropZoneBinding {
        zone_id: "gainput-zone",
        input_id: "ga_input",
        label_id: "ga-name",
        label_style: LabelStyle::Bare,
    },
];

/// Upload zone on the dashboard; its input feeds the generate flow.
pub const DATASET_ZONE: DropZoneBinding = DropZoneBinding {
    zone_id: "fileDropArea",
    input_id: "datasetUpload",
    label_id: "fileNameDisplay",
    label_style: LabelStyle::Selected,
};

/// What happened on or to a zone. File lists are given as names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent<'a> {
    DragOver,
    DragLeave,
    Drop(&'a [String]),
    Click,
    /// The input's selection changed through the native dialog.
    Selected(&'a [String]),
}

/// What the page should do in response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneEffect {
    /// Cancel the browser default (opening the dropped file).
    PreventDefault,
    SetHighlight(bool),
    /// Replace the input's file list with the dropped list.
    AssignDroppedFiles,
    SetLabel(String),
    OpenFileDialog,
}

impl DropZoneBinding {
    pub fn handle(&self, event: ZoneEvent<'_>) -> Vec<ZoneEffect> {
        match event {
            ZoneEvent::DragOver => vec![ZoneEffect::PreventDefault, ZoneEffect::SetHighlight(true)],
            ZoneEvent::DragLeave => {
                vec![ZoneEffect::PreventDefault, ZoneEffect::SetHighlight(false)]
            }
            ZoneEvent::Drop(names) => {
                let mut effects = vec![ZoneEffect::PreventDefault, ZoneEffect::SetHighlight(false)];
                if let Some(first) = names.first() {
                    effects.push(ZoneEffect::AssignDroppedFiles);
                    effects.push(ZoneEffect::SetLabel(self.label_style.render(first)));
                }
                effects
            }
            ZoneEvent::Click => vec![ZoneEffect::OpenFileDialog],
            ZoneEvent::Selected(names) => {
                let label = names
                    .first()
                    .map(|n| self.label_style.render(n))
                    .unwrap_or_default();
                vec![ZoneEffect::SetLabel(label)]
            }
        }
    }
}
