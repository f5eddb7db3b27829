use super::{ChartSurface, LoadKind, SeriesWindow};

struct LoadChannel<C> {
    kind: LoadKind,
    window: SeriesWindow,
    surface: Option<C>,
}

/// Simulated system-load feed for the three load charts.
///
/// Channels whose chart could not be created (missing canvas) are kept but
/// skipped on every tick, so their window stays empty.
pub struct LoadMonitor<C> {
    channels: Vec<LoadChannel<C>>,
    ticks: u64,
}

impl<C: ChartSurface> LoadMonitor<C> {
    /// Build a monitor, asking `make_surface` for each kind's chart.
    pub fn new(window_points: usize, mut make_surface: impl FnMut(LoadKind) -> Option<C>) -> Self {
        let channels = LoadKind::ALL
            .into_iter()
            .map(|kind| LoadChannel {
                kind,
                window: SeriesWindow::new(window_points),
                surface: make_surface(kind),
            })
            .collect();
        Self { channels, ticks: 0 }
    }

    /// Push one sample per live chart and redraw it.
    ///
    /// `unit` yields uniform draws from `[0, 1)`, one per live chart, in
    /// CPU, RAM, Memory order.
    pub fn tick(&mut self, label: &str, mut unit: impl FnMut() -> f64) {
        for channel in &mut self.channels {
            let Some(surface) = channel.surface.as_mut() else {
                continue;
            };
            channel.window.push(label, channel.kind.sample(unit()));
            let (labels, values) = channel.window.snapshot();
            surface.draw(&labels, &values);
        }
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn window(&self, kind: LoadKind) -> Option<&SeriesWindow> {
        self.channels
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| &c.window)
    }

    /// Number of channels bound to a chart.
    pub fn live_charts(&self) -> usize {
        self.channels.iter().filter(|c| c.surface.is_some()).count()
    }
}
