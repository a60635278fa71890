//! Tracker table pane. Rows and selection live in the tracker view's
//! `KeyedTable`; this module maps keys to actions and paints the table.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use trackers_proto::tracker::TrackerRow;

use crate::{
    action::Action,
    app_state::AppState,
    theme::{
        status_color, style_header, style_muted, style_secondary, C_ERROR, C_MUTED, C_PRIMARY,
        C_SELECTION_BG, C_STATIC_ROW, C_STRIPE_BG,
    },
    view::table::KeyedTable,
    widgets::pane_chrome::{pane_chrome, Badge},
};

const HEADERS: [&str; 8] = [
    "Tier", "URL", "Status", "Peers", "Seeds", "Leeches", "Downloaded", "Message",
];

/// Fixed widths for everything but URL and Message, which share the rest.
const WIDTHS: [Constraint; 8] = [
    Constraint::Length(4),
    Constraint::Fill(3),
    Constraint::Length(17),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Length(7),
    Constraint::Length(10),
    Constraint::Fill(2),
];

pub fn handle_key(key: KeyEvent) -> Vec<Action> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::CursorUp(1),
        KeyCode::Down | KeyCode::Char('j') => Action::CursorDown(1),
        KeyCode::Char('K') => Action::CursorUpKeep,
        KeyCode::Char('J') => Action::CursorDownKeep,
        KeyCode::PageUp => Action::CursorUp(10),
        KeyCode::PageDown => Action::CursorDown(10),
        KeyCode::Home | KeyCode::Char('g') => Action::CursorFirst,
        KeyCode::End | KeyCode::Char('G') => Action::CursorLast,
        KeyCode::Char(' ') => Action::ToggleRowSelection,
        KeyCode::Char('V') => Action::SelectAllRows,
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::SelectAllRows
        }
        KeyCode::Enter | KeyCode::Char('m') => Action::OpenMenu,
        KeyCode::Char('a') => Action::AddTracker,
        KeyCode::Char('e') => Action::EditTracker,
        KeyCode::Char('d') | KeyCode::Delete => Action::RemoveTrackers,
        KeyCode::Char('y') => Action::CopyTrackerUrls,
        _ => return vec![],
    };
    vec![action]
}

/// Cut `text` to `width` terminal columns, ending in `…` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn cells(row: &TrackerRow) -> [&str; 8] {
    [
        &row.tier,
        &row.url,
        &row.status,
        &row.peers,
        &row.seeds,
        &row.leeches,
        &row.downloaded,
        &row.message,
    ]
}

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    focused: bool,
    table: &mut KeyedTable,
    subject_name: Option<&str>,
    state: &AppState,
) {
    let title = match subject_name {
        Some(name) => format!("trackers · {}", name),
        None => "trackers".to_string(),
    };
    let count = format!("{} rows", table.len());
    let badge = if state.tracker_error.is_some() {
        Some(Badge {
            text: "ERR",
            color: C_ERROR,
        })
    } else if state.trackers_loading {
        Some(Badge {
            text: "…",
            color: C_MUTED,
        })
    } else if !table.is_empty() {
        Some(Badge {
            text: &count,
            color: C_MUTED,
        })
    } else {
        None
    };
    let block = pane_chrome(&title, Some('2'), focused, badge);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if table.is_empty() {
        let msg = if subject_name.is_none() {
            "  select a torrent"
        } else if state.trackers_loading {
            "  loading…"
        } else {
            "  no trackers"
        };
        frame.render_widget(Paragraph::new(Span::styled(msg, style_muted())), inner);
        return;
    }

    // Header takes one row.
    let body_h = inner.height.saturating_sub(1) as usize;
    table.ensure_visible(body_h);

    let col_widths: Vec<u16> = ratatui::layout::Layout::horizontal(WIDTHS)
        .spacing(1)
        .split(inner)
        .iter()
        .map(|r| r.width)
        .collect();

    let cursor = table.cursor_index();
    let rows: Vec<Row> = table
        .painted()
        .iter()
        .enumerate()
        .skip(table.scroll_offset)
        .take(body_h)
        .map(|(idx, row)| {
            let selected = table.is_selected(&row.row_id);
            let mut style = if selected {
                Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
            } else if table.is_striped(idx) {
                Style::default().bg(C_STRIPE_BG)
            } else {
                Style::default()
            };
            if cursor == Some(idx) && focused {
                style = style.add_modifier(Modifier::BOLD);
            }
            let url_color = if row.is_static() { C_STATIC_ROW } else { C_PRIMARY };

            let cells = cells(row).into_iter().enumerate().map(|(col, text)| {
                let width = col_widths.get(col).copied().unwrap_or(0) as usize;
                let text = truncate(text, width);
                match col {
                    1 => Cell::from(text).style(Style::default().fg(url_color)),
                    2 => Cell::from(text).style(Style::default().fg(status_color(&row.status))),
                    7 => Cell::from(text).style(style_secondary()),
                    _ => Cell::from(text),
                }
            });
            Row::new(cells).style(style)
        })
        .collect();

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(style_header());
    let widget = Table::new(rows, WIDTHS).header(header).column_spacing(1);
    frame.render_widget(widget, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_truncate_by_columns() {
        assert_eq!(truncate("http://t1/ann", 20), "http://t1/ann");
        assert_eq!(truncate("http://t1/ann", 8), "http://…");
        assert_eq!(truncate("トラッカー", 5), "トラ…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key(key(KeyCode::Char('d'), KeyModifiers::NONE)),
            vec![Action::RemoveTrackers]
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            vec![Action::SelectAllRows]
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            vec![Action::AddTracker]
        );
        assert!(handle_key(key(KeyCode::Char('z'), KeyModifiers::NONE)).is_empty());
    }
}
