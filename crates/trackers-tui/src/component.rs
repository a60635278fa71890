//! Component trait — the interface the self-contained UI panels implement.
//!
//! - Components own their widget state and render themselves.
//! - They read `AppState` for data they don't own and never mutate it.
//! - Key handling produces `Vec<Action>`; the App dispatches those.
//!
//! The tracker table is the exception: its rows live in the tracker view, so
//! it is drawn by a free function instead (see `components::tracker_table`).

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event. Only called while this component has focus.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// React to an action dispatched by the App, focused or not.
    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
