//! FocusRing — keyboard focus cycling between panes.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = self.current.checked_sub(1).unwrap_or(self.items.len() - 1);
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_both_ways() {
        let mut ring = FocusRing::new(vec![ComponentId::TorrentList, ComponentId::Trackers]);
        assert_eq!(ring.next(), Some(ComponentId::Trackers));
        assert_eq!(ring.next(), Some(ComponentId::TorrentList));
        assert_eq!(ring.prev(), Some(ComponentId::Trackers));
    }

    #[test]
    fn test_set_jumps_to_known_id_only() {
        let mut ring = FocusRing::new(vec![ComponentId::TorrentList, ComponentId::Trackers]);
        ring.set(ComponentId::Trackers);
        assert!(ring.is_focused(ComponentId::Trackers));
        ring.set(ComponentId::ContextMenu);
        assert!(ring.is_focused(ComponentId::Trackers));
    }
}
