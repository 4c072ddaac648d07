use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Chart, Clear, Dataset, GraphType, Paragraph, Tabs};

use crate::chart::app::{App, InputMode};
use crate::chart::series::{axis_labels, ChartKind};

const TITLE: &str = "Review Metrics";

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Chart(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_chart(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let source = app.source.display().to_string();
    let padding_len = (area.width as usize).saturating_sub(TITLE.len() + source.len());

    let title = Line::from(vec![
        Span::styled(TITLE, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(source, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = ChartKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| format!("{} {}", i + 1, kind.tab_label()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.chart.index())
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_chart(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title(format!(" {} ", app.chart.title()))
        .title_style(Style::default().fg(app.theme.title_color).bold());

    if app.plot.points.is_empty() {
        let msg = Paragraph::new("No pull requests to plot")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let plot = &app.plot;
    let dataset = Dataset::default()
        .name(format!("{} PRs", plot.points.len()))
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(app.theme.point_color))
        .data(&plot.points);

    let axis_style = Style::default().fg(app.theme.axis_color);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("Lines changed")
                .style(axis_style)
                .bounds(plot.x_bounds)
                .labels(axis_labels(plot.x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(app.chart.y_label())
                .style(axis_style)
                .bounds(plot.y_bounds)
                .labels(axis_labels(plot.y_bounds)),
        );

    frame.render_widget(chart, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        format!("{} PRs", app.records.len()),
        Style::default().fg(theme.muted),
    )];

    if app.plot.skipped > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{} not plotted (no lines changed)", app.plot.skipped),
            Style::default().fg(theme.warning),
        ));
    }
    spans.push(Span::raw("  "));

    let hints = [
        ("Tab", ":next "),
        ("1-4", ":jump "),
        ("?", ":help "),
        ("q", ":quit"),
    ];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
        spans.push(Span::raw(*label));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(48, 11, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let rows = [
        ("Tab / Right / l   ", "Next chart"),
        ("S-Tab / Left / h  ", "Previous chart"),
        ("1 - 4             ", "Jump to chart"),
        ("?                 ", "Show/hide this help"),
        ("q / Esc / Ctrl-c  ", "Quit"),
    ];
    let mut help_lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
