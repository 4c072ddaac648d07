use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::metrics::MetricRecord;

/// Widest title shown when stdout is not a terminal
const PIPE_TITLE_WIDTH: usize = 60;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Confirmation line printed after the CSV was written
pub fn format_export_message(count: usize, path: &Path, use_colors: bool) -> String {
    let noun = if count == 1 { "pull request" } else { "pull requests" };
    if use_colors {
        format!(
            "Wrote {} {} to {}",
            count.bold(),
            noun,
            path.display().underline()
        )
    } else {
        format!("Wrote {} {} to {}", count, noun, path.display())
    }
}

/// Humanize a minute count: 90.0 -> "1h 30m". Rounded to whole minutes.
/// Negative spans keep their sign.
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() {
        return "n/a".to_string();
    }
    let whole = minutes.abs().round() as u64;
    if whole == 0 {
        return "0m".to_string();
    }
    let human = humantime::format_duration(Duration::from_secs(whole * 60)).to_string();
    if minutes < 0.0 {
        format!("-{}", human)
    } else {
        human
    }
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// One line per PR for verbose output:
/// "#123  title  +15 lines  cycle 1h 30m  lead 45m  2 comments"
pub fn format_record_line(rec: &MetricRecord, title_width: usize, use_colors: bool) -> String {
    let number = format!("#{:<6}", rec.number);
    let title = format!(
        "{:<width$}",
        truncate_title(&rec.title, title_width),
        width = title_width
    );
    let lines = format!("{:>6} lines", rec.lines_changed);
    let cycle = format!("cycle {}", format_minutes(rec.cycle_time_minutes));
    let lead = if rec.is_reviewed() {
        format!("lead {}", format_minutes(rec.lead_time_minutes))
    } else {
        "unreviewed".to_string()
    };
    let comments = format!("{} comments", rec.comments_added);

    if use_colors {
        let lead = if rec.is_reviewed() {
            lead.green().to_string()
        } else {
            lead.yellow().to_string()
        };
        format!(
            "{} {}  {}  {}  {}  {}",
            number.dimmed(),
            title.bold(),
            lines,
            cycle.cyan(),
            lead,
            comments
        )
    } else {
        format!("{} {}  {}  {}  {}  {}", number, title, lines, cycle, lead, comments)
    }
}

/// Format all records, one line each, sized to the terminal
pub fn format_record_list(records: &[MetricRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No pull requests found.".to_string();
    }

    // Everything except the title takes about 60 columns
    let title_width = match get_terminal_width() {
        Some(width) if width > 80 => width - 60,
        Some(_) => 20,
        None => PIPE_TITLE_WIDTH,
    };

    records
        .iter()
        .map(|rec| format_record_line(rec, title_width, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Aggregate line: median cycle time, median lead time over reviewed PRs,
/// total lines changed
pub fn format_summary(records: &[MetricRecord]) -> String {
    let mut cycles: Vec<f64> = records.iter().map(|r| r.cycle_time_minutes).collect();
    let mut leads: Vec<f64> = records
        .iter()
        .filter(|r| r.is_reviewed())
        .map(|r| r.lead_time_minutes)
        .collect();
    let total_lines: u64 = records.iter().map(|r| r.lines_changed).sum();

    let cycle = median(&mut cycles).map_or_else(|| "n/a".to_string(), format_minutes);
    let lead = median(&mut leads).map_or_else(|| "n/a".to_string(), format_minutes);

    format!(
        "Median cycle time: {} | Median lead time: {} ({} of {} reviewed) | Lines changed: {}",
        cycle,
        lead,
        leads.len(),
        records.len(),
        total_lines
    )
}
