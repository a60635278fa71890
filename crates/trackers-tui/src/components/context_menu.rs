//! ContextMenu component — popup listing the tracker actions offered for the
//! current selection.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::centered_rect,
    theme::{C_NUMBER_HINT, C_PANEL_BORDER_FOCUSED, C_POPUP_BG, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    view::menu::MenuItem,
};

fn item_action(item: MenuItem) -> Action {
    match item {
        MenuItem::AddTracker => Action::AddTracker,
        MenuItem::EditTracker => Action::EditTracker,
        MenuItem::RemoveTracker => Action::RemoveTrackers,
        MenuItem::CopyTrackerUrl => Action::CopyTrackerUrls,
    }
}

#[derive(Default)]
pub struct ContextMenu {
    pub visible: bool,
    cursor: usize,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for ContextMenu {
    fn id(&self) -> ComponentId {
        ComponentId::ContextMenu
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        let items = &state.menu_items;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => vec![Action::CloseMenu],
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(items.len().saturating_sub(1));
                vec![]
            }
            KeyCode::Enter => items
                .get(self.cursor)
                .map(|item| vec![item_action(*item)])
                .unwrap_or_default(),
            // Hotkeys only reach items that are currently offered.
            KeyCode::Char(c) => items
                .iter()
                .find(|item| item.hotkey() == c)
                .map(|item| vec![item_action(*item)])
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenMenu => {
                self.visible = true;
                self.cursor = 0;
            }
            Action::CloseMenu
            | Action::AddTracker
            | Action::EditTracker
            | Action::RemoveTrackers
            | Action::CopyTrackerUrls => self.visible = false,
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let items = &state.menu_items;
        let popup = centered_rect(40, items.len() as u16 + 2, area);
        frame.render_widget(Clear, popup);

        let lines: Vec<Line> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == self.cursor;
                let style = if selected {
                    Style::default()
                        .fg(C_PRIMARY)
                        .bg(C_SELECTION_BG)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(C_SECONDARY)
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", item.hotkey()), Style::default().fg(C_NUMBER_HINT)),
                    Span::styled(format!("{:<30}", item.label()), style),
                ])
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .title(" trackers ")
                    .style(Style::default().bg(C_POPUP_BG)),
            ),
            popup,
        );
    }
}
