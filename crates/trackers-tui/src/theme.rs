//! Color palette and style constants for the tracker TUI.

use ratatui::style::{Color, Modifier, Style};

use trackers_proto::tracker::TrackerStatus;

const STATUS_COLORS: [(TrackerStatus, Color); 5] = [
    (TrackerStatus::Disabled, C_MUTED),
    (TrackerStatus::NotContacted, C_SECONDARY),
    (TrackerStatus::Working, C_OK),
    (TrackerStatus::Updating, C_PENDING),
    (TrackerStatus::NotWorking, C_ERROR),
];

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_OK: Color = Color::Rgb(80, 200, 120);
pub const C_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(44, 40, 72);
pub const C_STRIPE_BG: Color = Color::Rgb(24, 24, 32);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200); // vibrant purple
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_POPUP_BG: Color = Color::Rgb(18, 18, 26);
pub const C_STATIC_ROW: Color = Color::Rgb(100, 160, 200);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_MENU: Color = Color::Rgb(120, 100, 200);
pub const C_MODE_DIALOG: Color = Color::Rgb(255, 200, 80);

/// Foreground for a tracker status cell, keyed by its display label.
pub fn status_color(label: &str) -> Color {
    STATUS_COLORS
        .iter()
        .find(|(status, _)| status.label() == label)
        .map(|(_, color)| *color)
        .unwrap_or(C_MUTED)
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_header() -> Style {
    Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}
