//! TorrentList component — left pane; its cursor is the tracker view's subject.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use trackers_proto::torrent::TorrentInfo;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_OK, C_PENDING, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::{pane_chrome::pane_chrome, selectable_list::SelectableList},
};

pub struct TorrentList {
    list: SelectableList<TorrentInfo>,
}

impl TorrentList {
    pub fn new() -> Self {
        Self {
            list: SelectableList::new(|t: &TorrentInfo| t.hash.clone()),
        }
    }

    /// Hash under the cursor, or empty when the list is empty.
    pub fn selected_hash(&self) -> String {
        self.list.selected_key().unwrap_or_default()
    }

    /// Load a fresh torrent list. Returns the new subject when the cursor
    /// ended up on a different torrent.
    pub fn sync(&mut self, torrents: &[TorrentInfo]) -> Option<Action> {
        let before = self.selected_hash();
        self.list.set_items(torrents.to_vec());
        let after = self.selected_hash();
        (before != after).then_some(Action::SelectTorrent(after))
    }

    fn moved(&self, before: String) -> Vec<Action> {
        let after = self.selected_hash();
        if before == after {
            vec![]
        } else {
            vec![Action::SelectTorrent(after)]
        }
    }

    fn render_item<'a>(torrent: &'a TorrentInfo, is_selected: bool) -> ListItem<'a> {
        let state_color = match torrent.state.as_str() {
            "uploading" | "stalledUP" | "forcedUP" => C_OK,
            "downloading" | "stalledDL" | "forcedDL" | "metaDL" => C_PENDING,
            _ => C_MUTED,
        };
        let name_style = if is_selected {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        let line = Line::from(vec![
            Span::styled(
                format!("{:>3}% ", torrent.percent_done()),
                Style::default().fg(state_color),
            ),
            Span::styled(torrent.name.as_str(), name_style),
        ]);
        let bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(line).style(bg)
    }
}

impl Default for TorrentList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TorrentList {
    fn id(&self) -> ComponentId {
        ComponentId::TorrentList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let before = self.selected_hash();
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => return vec![Action::FocusNext],
            _ => return vec![],
        }
        self.moved(before)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("torrents", Some('1'), focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            let msg = if state.connected {
                "  no torrents"
            } else {
                "  connecting to WebUI…"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.list.ensure_visible(height);
        let selected = self.list.selected;
        let items: Vec<ListItem> = self
            .list
            .visible_items(height)
            .map(|(i, t)| Self::render_item(t, i == selected))
            .collect();
        frame.render_widget(List::new(items), inner);
    }
}
