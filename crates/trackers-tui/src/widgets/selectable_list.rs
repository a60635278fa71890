//! Scrollable list with a single cursor that follows its item across reloads.

pub struct SelectableList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
    key_fn: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> SelectableList<T> {
    /// `key_fn` identifies an item across `set_items` calls.
    pub fn new(key_fn: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            key_fn: Box::new(key_fn),
        }
    }

    /// Replace the items, keeping the cursor on the same key when it is
    /// still present and clamping it otherwise.
    pub fn set_items(&mut self, items: Vec<T>) {
        let old_key = self.selected_key();
        self.items = items;
        self.selected = old_key
            .and_then(|key| self.items.iter().position(|i| (self.key_fn)(i) == key))
            .unwrap_or_else(|| self.selected.min(self.items.len().saturating_sub(1)));
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn selected_key(&self) -> Option<String> {
        self.selected_item().map(|i| (self.key_fn)(i))
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        self.selected = (self.selected + n).min(self.items.len().saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// `(index, item)` pairs inside a viewport of `height` rows.
    pub fn visible_items(&self, height: usize) -> impl Iterator<Item = (usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(height)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> SelectableList<String> {
        let mut l = SelectableList::new(|s: &String| s.clone());
        l.set_items(items.iter().map(|s| s.to_string()).collect());
        l
    }

    #[test]
    fn test_cursor_follows_key_on_reload() {
        let mut l = list(&["a", "b", "c"]);
        l.select_down(2);
        l.set_items(vec!["c".into(), "a".into()]);
        assert_eq!(l.selected_key().as_deref(), Some("c"));
    }

    #[test]
    fn test_cursor_clamps_when_key_vanishes() {
        let mut l = list(&["a", "b", "c"]);
        l.select_last();
        l.set_items(vec!["a".into()]);
        assert_eq!(l.selected, 0);
        l.set_items(Vec::new());
        assert_eq!(l.selected_item(), None);
    }

    #[test]
    fn test_visible_window() {
        let mut l = list(&["a", "b", "c", "d"]);
        l.select_last();
        l.ensure_visible(2);
        let shown: Vec<usize> = l.visible_items(2).map(|(i, _)| i).collect();
        assert_eq!(shown, vec![2, 3]);
    }
}
