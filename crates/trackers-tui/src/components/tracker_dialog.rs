//! TrackerDialog component — modal add / edit tracker form.
//!
//! Add collects one url per Enter and submits on Enter with an empty line.
//! Edit is a single prefilled field. Submitting hands the request to the App
//! as an action; cancelling reports `DialogClosed`.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::centered_rect,
    theme::{style_input, style_muted, C_PANEL_BORDER_FOCUSED, C_POPUP_BG, C_PRIMARY, C_SECONDARY},
    view::host::DialogRequest,
};

/// Split pasted or typed text into urls; any whitespace separates entries.
pub fn parse_urls(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[derive(Default)]
pub struct TrackerDialog {
    request: Option<DialogRequest>,
    input: Input,
    /// Urls queued so far in the add dialog.
    pending: Vec<String>,
}

impl TrackerDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.request.is_some()
    }

    pub fn open(&mut self, request: DialogRequest) {
        self.input = match &request {
            DialogRequest::EditTracker { url, .. } => Input::new(url.clone()),
            DialogRequest::AddTrackers { .. } => Input::default(),
        };
        self.pending.clear();
        self.request = Some(request);
    }

    fn close(&mut self) -> Option<DialogRequest> {
        self.pending.clear();
        self.input = Input::default();
        self.request.take()
    }

    fn cancel(&mut self) -> Vec<Action> {
        self.close();
        vec![Action::DialogClosed]
    }

    fn submit(&mut self) -> Vec<Action> {
        let Some(request) = self.request.clone() else {
            return vec![];
        };
        match request {
            DialogRequest::AddTrackers { hash } => {
                let typed = parse_urls(self.input.value());
                if !typed.is_empty() {
                    self.pending.extend(typed);
                    self.input = Input::default();
                    return vec![];
                }
                if self.pending.is_empty() {
                    return self.cancel();
                }
                let action = Action::SubmitAddTrackers {
                    hash,
                    urls: std::mem::take(&mut self.pending),
                };
                self.close();
                vec![action]
            }
            DialogRequest::EditTracker { hash, url } => {
                let new_url = self.input.value().trim().to_string();
                if new_url.is_empty() || new_url == url {
                    return self.cancel();
                }
                let action = Action::SubmitEditTracker {
                    hash,
                    orig_url: url,
                    new_url,
                };
                self.close();
                vec![action]
            }
        }
    }
}

impl Component for TrackerDialog {
    fn id(&self) -> ComponentId {
        ComponentId::TrackerDialog
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_open() {
            return vec![];
        }
        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Enter => self.submit(),
            _ => {
                self.input.handle_event(&Event::Key(key));
                vec![]
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(request) = self.request.as_ref() else {
            return;
        };

        let torrent = state
            .torrent_name(request.hash())
            .unwrap_or_else(|| request.hash());
        let mut lines = vec![
            Line::from(Span::styled(format!(" {}", torrent), Style::default().fg(C_SECONDARY))),
            Line::from(""),
        ];
        let hint = match request {
            DialogRequest::AddTrackers { .. } => {
                for url in &self.pending {
                    lines.push(Line::from(Span::styled(
                        format!("  + {}", url),
                        Style::default().fg(C_PRIMARY),
                    )));
                }
                " enter adds a url · enter on an empty line submits · esc cancels"
            }
            DialogRequest::EditTracker { url, .. } => {
                lines.push(Line::from(Span::styled(format!("  was {}", url), style_muted())));
                " enter saves · esc cancels"
            }
        };
        let input_row = lines.len() as u16;
        lines.push(Line::from(""));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(hint, style_muted())));

        let popup = centered_rect(70, lines.len() as u16 + 2, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
            .title(format!(" {} ", request.title()))
            .style(Style::default().bg(C_POPUP_BG));
        let inner = block.inner(popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);

        let field = Rect {
            x: inner.x + 1,
            y: inner.y + input_row,
            width: inner.width.saturating_sub(2),
            height: 1,
        };
        let scroll = self.input.visual_scroll(field.width.saturating_sub(1) as usize);
        frame.render_widget(
            Paragraph::new(self.input.value())
                .style(style_input())
                .scroll((0, scroll as u16)),
            field,
        );
        let cursor_x = field.x + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
        frame.set_cursor_position((cursor_x.min(field.x + field.width.saturating_sub(1)), field.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(dialog: &mut TrackerDialog, state: &AppState, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)), state);
        }
    }

    fn state() -> AppState {
        AppState::new("http://127.0.0.1:8080", 10)
    }

    #[test]
    fn test_parse_urls_splits_lines_and_spaces() {
        assert_eq!(
            parse_urls(" http://a/ann\nudp://b:1337  \n\n http://c "),
            vec!["http://a/ann", "udp://b:1337", "http://c"]
        );
        assert!(parse_urls("  \n").is_empty());
    }

    #[test]
    fn test_add_collects_then_submits() {
        let state = state();
        let mut dialog = TrackerDialog::new();
        dialog.open(DialogRequest::AddTrackers { hash: "h".into() });

        type_text(&mut dialog, &state, "http://a/ann");
        assert!(dialog.handle_key(key(KeyCode::Enter), &state).is_empty());
        type_text(&mut dialog, &state, "udp://b:1337");
        assert!(dialog.handle_key(key(KeyCode::Enter), &state).is_empty());

        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter), &state),
            vec![Action::SubmitAddTrackers {
                hash: "h".into(),
                urls: vec!["http://a/ann".into(), "udp://b:1337".into()],
            }]
        );
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_add_with_nothing_typed_just_closes() {
        let state = state();
        let mut dialog = TrackerDialog::new();
        dialog.open(DialogRequest::AddTrackers { hash: "h".into() });
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter), &state),
            vec![Action::DialogClosed]
        );
    }

    #[test]
    fn test_edit_is_prefilled() {
        let state = state();
        let mut dialog = TrackerDialog::new();
        dialog.open(DialogRequest::EditTracker {
            hash: "h".into(),
            url: "http://old/ann".into(),
        });
        // Unchanged url is a cancel.
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter), &state),
            vec![Action::DialogClosed]
        );

        dialog.open(DialogRequest::EditTracker {
            hash: "h".into(),
            url: "http://old/ann".into(),
        });
        for _ in 0.."ann".len() {
            dialog.handle_key(key(KeyCode::Backspace), &state);
        }
        type_text(&mut dialog, &state, "announce");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter), &state),
            vec![Action::SubmitEditTracker {
                hash: "h".into(),
                orig_url: "http://old/ann".into(),
                new_url: "http://old/announce".into(),
            }]
        );
    }

    #[test]
    fn test_escape_cancels() {
        let state = state();
        let mut dialog = TrackerDialog::new();
        dialog.open(DialogRequest::AddTrackers { hash: "h".into() });
        type_text(&mut dialog, &state, "http://a");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Esc), &state),
            vec![Action::DialogClosed]
        );
        assert!(!dialog.is_open());
    }
}
