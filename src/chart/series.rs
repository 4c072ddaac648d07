use clap::ValueEnum;

use crate::metrics::MetricRecord;

/// Which scatter plot to show. The x axis is always lines changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChartKind {
    /// Cycle time against lines changed
    #[default]
    CycleTime,
    /// Cycle time per line changed
    CycleTimePerLine,
    /// Lead time per line changed
    LeadTimePerLine,
    /// Comments added against lines changed
    Engagement,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::CycleTime,
        ChartKind::CycleTimePerLine,
        ChartKind::LeadTimePerLine,
        ChartKind::Engagement,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::CycleTime => "Size vs Cycle Time",
            ChartKind::CycleTimePerLine => "Size vs Cycle Time / LoC",
            ChartKind::LeadTimePerLine => "Size vs Lead Time / LoC",
            ChartKind::Engagement => "Size vs Engagement",
        }
    }

    /// Short label for the tab bar
    pub fn tab_label(self) -> &'static str {
        match self {
            ChartKind::CycleTime => "Cycle",
            ChartKind::CycleTimePerLine => "Cycle/LoC",
            ChartKind::LeadTimePerLine => "Lead/LoC",
            ChartKind::Engagement => "Engagement",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            ChartKind::CycleTime => "Cycle time (min)",
            ChartKind::CycleTimePerLine => "Cycle time / LoC (min)",
            ChartKind::LeadTimePerLine => "Lead time / LoC (min)",
            ChartKind::Engagement => "Comments",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ChartKind::CycleTime => 0,
            ChartKind::CycleTimePerLine => 1,
            ChartKind::LeadTimePerLine => 2,
            ChartKind::Engagement => 3,
        }
    }

    /// Chart at a zero-based position, if any
    pub fn from_index(index: usize) -> Option<ChartKind> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> ChartKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> ChartKind {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn y_value(self, rec: &MetricRecord) -> f64 {
        let lines = rec.lines_changed as f64;
        match self {
            ChartKind::CycleTime => rec.cycle_time_minutes,
            ChartKind::CycleTimePerLine => rec.cycle_time_minutes / lines,
            ChartKind::LeadTimePerLine => rec.lead_time_minutes / lines,
            ChartKind::Engagement => rec.comments_added as f64,
        }
    }
}

/// Raw (lines changed, metric) pairs in record order.
///
/// Ratios are not guarded: a PR with no changed lines yields an infinite
/// or NaN value.
pub fn scatter_points(records: &[MetricRecord], kind: ChartKind) -> Vec<(f64, f64)> {
    records
        .iter()
        .map(|rec| (rec.lines_changed as f64, kind.y_value(rec)))
        .collect()
}

/// Plottable points for one chart plus the axis ranges that contain them
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub points: Vec<(f64, f64)>,
    /// Points left out because a coordinate was not finite
    pub skipped: usize,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl PlotData {
    pub fn new(records: &[MetricRecord], kind: ChartKind) -> Self {
        let raw = scatter_points(records, kind);
        let total = raw.len();
        let points: Vec<(f64, f64)> = raw
            .into_iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();

        let x_bounds = bounds(points.iter().map(|(x, _)| *x));
        let y_bounds = bounds(points.iter().map(|(_, y)| *y));

        PlotData {
            skipped: total - points.len(),
            points,
            x_bounds,
            y_bounds,
        }
    }
}

/// Min/max with 5% padding. Falls back to [0, 1] with no values and widens
/// a zero-width range by 1 on each side.
fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min > max {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 1.0, max + 1.0];
    }

    let pad = (max - min) * 0.05;
    [min - pad, max + pad]
}

/// Three evenly spaced tick labels across the range
pub fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let [lo, hi] = bounds;
    [lo, (lo + hi) / 2.0, hi]
        .iter()
        .map(|v| format_tick(*v))
        .collect()
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
