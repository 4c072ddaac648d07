use std::path::PathBuf;

use crate::chart::series::{ChartKind, PlotData};
use crate::chart::theme::ThemeColors;
use crate::metrics::MetricRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub records: Vec<MetricRecord>,
    pub source: PathBuf,
    pub chart: ChartKind,
    pub plot: PlotData, // points for `chart`, rebuilt on switch
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(
        records: Vec<MetricRecord>,
        source: PathBuf,
        chart: ChartKind,
        theme: ThemeColors,
    ) -> Self {
        let plot = PlotData::new(&records, chart);
        Self {
            records,
            source,
            chart,
            plot,
            input_mode: InputMode::Normal,
            should_quit: false,
            theme,
        }
    }

    pub fn select(&mut self, chart: ChartKind) {
        if chart != self.chart {
            self.chart = chart;
            self.plot = PlotData::new(&self.records, chart);
        }
    }

    pub fn next_chart(&mut self) {
        self.select(self.chart.next());
    }

    pub fn previous_chart(&mut self) {
        self.select(self.chart.previous());
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn records() -> Vec<MetricRecord> {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        [(0, 30.0), (10, 90.0)]
            .into_iter()
            .enumerate()
            .map(|(i, (lines, cycle))| MetricRecord {
                title: format!("PR {}", i),
                number: i as u64,
                url: String::new(),
                created_by: "bob".to_string(),
                created_at: created,
                merged_at: created,
                first_review: None,
                cycle_time_minutes: cycle,
                lead_time_minutes: 0.0,
                lines_changed: lines,
                comments_added: 1,
            })
            .collect()
    }

    #[test]
    fn test_switching_rebuilds_plot() {
        let mut app = App::new(
            records(),
            PathBuf::from("m.csv"),
            ChartKind::CycleTime,
            ThemeColors::dark(),
        );
        assert_eq!(app.plot.points.len(), 2);

        app.next_chart();
        assert_eq!(app.chart, ChartKind::CycleTimePerLine);
        assert_eq!(app.plot.points.len(), 1);
        assert_eq!(app.plot.skipped, 1);

        app.previous_chart();
        app.previous_chart();
        assert_eq!(app.chart, ChartKind::Engagement);
        assert_eq!(app.plot.skipped, 0);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::new(vec![], PathBuf::new(), ChartKind::default(), ThemeColors::dark());
        app.show_help();
        assert_eq!(app.input_mode, InputMode::Help);
        app.dismiss_help();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
