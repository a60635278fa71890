//! Context-menu item visibility for the tracker table.

use trackers_proto::tracker::is_static_tracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    AddTracker,
    EditTracker,
    RemoveTracker,
    CopyTrackerUrl,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::AddTracker,
        MenuItem::EditTracker,
        MenuItem::RemoveTracker,
        MenuItem::CopyTrackerUrl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::AddTracker => "Add a new tracker...",
            MenuItem::EditTracker => "Edit tracker URL...",
            MenuItem::RemoveTracker => "Remove tracker",
            MenuItem::CopyTrackerUrl => "Copy tracker URL",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            MenuItem::AddTracker => 'a',
            MenuItem::EditTracker => 'e',
            MenuItem::RemoveTracker => 'd',
            MenuItem::CopyTrackerUrl => 'y',
        }
    }
}

/// What the tracker view needs from a context-menu widget.
pub trait TrackerMenu {
    fn show_item(&mut self, item: MenuItem);
    fn hide_item(&mut self, item: MenuItem);
}

/// Items that act on existing rows are only offered for a non-empty selection
/// made of user trackers.
pub fn row_actions_allowed(selected: &[String]) -> bool {
    !selected.is_empty() && !selected.iter().any(|id| is_static_tracker(id))
}

/// Show or hide the row-dependent items for the current selection.
pub fn apply_selection_rule<M: TrackerMenu + ?Sized>(menu: &mut M, selected: &[String]) {
    let row_items = [
        MenuItem::EditTracker,
        MenuItem::RemoveTracker,
        MenuItem::CopyTrackerUrl,
    ];
    if row_actions_allowed(selected) {
        row_items.into_iter().for_each(|item| menu.show_item(item));
    } else {
        row_items.into_iter().for_each(|item| menu.hide_item(item));
    }
}

/// Plain visibility set; the TUI context menu renders from this.
#[derive(Debug, Clone)]
pub struct MenuItems {
    hidden: Vec<MenuItem>,
}

impl MenuItems {
    pub fn new() -> Self {
        Self { hidden: Vec::new() }
    }

    pub fn is_visible(&self, item: MenuItem) -> bool {
        !self.hidden.contains(&item)
    }

    pub fn visible(&self) -> Vec<MenuItem> {
        MenuItem::ALL
            .into_iter()
            .filter(|item| self.is_visible(*item))
            .collect()
    }
}

impl Default for MenuItems {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerMenu for MenuItems {
    fn show_item(&mut self, item: MenuItem) {
        self.hidden.retain(|h| *h != item);
    }

    fn hide_item(&mut self, item: MenuItem) {
        if !self.hidden.contains(&item) {
            self.hidden.push(item);
        }
    }
}
