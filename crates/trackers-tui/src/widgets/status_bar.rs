//! Status bar — connection line and the keybindings footer.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;
use crate::theme::{
    C_ACCENT, C_ERROR, C_MODE_DIALOG, C_MODE_MENU, C_MODE_NORMAL, C_MUTED, C_OK, C_SECONDARY,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Menu,
    Dialog,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Menu => "MENU",
            Self::Dialog => "DIALOG",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Menu => C_MODE_MENU,
            Self::Dialog => C_MODE_DIALOG,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Normal => {
                " ↑↓/jk move  J/K move keep  space select  V all  enter/m menu  a add  e edit  d remove  y copy  r refresh  t trackers  tab pane  q quit"
            }
            Self::Menu => " ↑↓/jk move  enter choose  a/e/d/y shortcut  esc close",
            Self::Dialog => " type url  enter submit  esc cancel",
        }
    }
}

/// Connection dot, server url, tracker refresh time and the last error.
pub fn draw_status_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let conn = if state.connected {
        Span::styled("●", Style::default().fg(C_OK))
    } else {
        Span::styled("○", Style::default().fg(C_ACCENT))
    };

    let mut spans = vec![
        conn,
        Span::raw(" "),
        Span::styled(state.base_url.as_str(), Style::default().fg(C_SECONDARY)),
    ];

    match &state.last_tracker_update {
        Some(at) => spans.push(Span::styled(
            format!("  trackers @ {}", at.format("%H:%M:%S")),
            Style::default().fg(C_MUTED),
        )),
        None => spans.push(Span::styled(
            format!("  every {}s", state.poll_interval_secs),
            Style::default().fg(C_MUTED),
        )),
    }

    if let Some(err) = state.tracker_error.as_deref().or(state.torrents_error.as_deref()) {
        spans.push(Span::styled(
            format!("  {}", err),
            Style::default().fg(C_ERROR),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(mode.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
