//! Color palettes for the chart viewer

use clap::ValueEnum;
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};

/// Theme preference from the command line or config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Pick by terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    // General colors
    pub title_color: Color,
    pub muted: Color,

    // Plot colors
    pub point_color: Color,
    pub axis_color: Color,
    pub warning: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            title_color: Color::Cyan,
            muted: Color::Gray,
            point_color: Color::Yellow,
            axis_color: Color::Gray,
            warning: Color::Red,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            title_color: Color::Blue,
            muted: Color::DarkGray,
            point_color: Color::Magenta,
            axis_color: Color::DarkGray,
            warning: Color::Red,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Gray),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
        }
    }
}

/// Luma above which the terminal background counts as light
const LIGHT_LUMA: f32 = 0.6;

/// Pick the palette. `Auto` queries the terminal background and falls back
/// to dark when the terminal does not answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
