//! Keyed tracker table — rows are addressed by their url.
//!
//! Mirrors the shape of a DOM-style dynamic table: `update_row_data` stages
//! rows into the model, `update_table` paints the model, `alt_row` computes
//! zebra stripes for the painted rows. `clear` drops rows, painted rows and
//! the selection in one go, so callers that want to keep a selection across
//! a rebuild must capture it first.

use std::collections::HashMap;

use trackers_proto::tracker::TrackerRow;

/// What the tracker view needs from a table widget.
pub trait TrackerTable {
    /// Drop every row and the selection.
    fn clear(&mut self);
    /// Insert a row, or replace the row with the same `row_id`.
    fn update_row_data(&mut self, row: TrackerRow);
    /// Paint the staged rows.
    fn update_table(&mut self, full_redraw: bool);
    /// Recompute zebra striping for the painted rows.
    fn alt_row(&mut self);
    fn selected_rows_ids(&self) -> Vec<String>;
    /// Select exactly the given ids that exist; unknown ids are ignored.
    fn reselect_rows(&mut self, ids: &[String]);
    /// Make `id` the only selected row. No-op for unknown ids.
    fn select_row(&mut self, id: &str);
    fn row(&self, id: &str) -> Option<&TrackerRow>;
}

#[derive(Debug, Default)]
pub struct KeyedTable {
    rows: Vec<TrackerRow>,
    index: HashMap<String, usize>,
    painted: Vec<TrackerRow>,
    stripes: Vec<bool>,
    selected: Vec<String>,
    /// Row under the keyboard cursor, by key so it survives rebuilds.
    cursor: Option<String>,
    pub scroll_offset: usize,
}

impl KeyedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows as last painted by `update_table`.
    pub fn painted(&self) -> &[TrackerRow] {
        &self.painted
    }

    pub fn is_striped(&self, painted_idx: usize) -> bool {
        self.stripes.get(painted_idx).copied().unwrap_or(false)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.painted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.painted.is_empty()
    }

    /// Painted index of the cursor row; falls back to the first row when the
    /// remembered key is gone.
    pub fn cursor_index(&self) -> Option<usize> {
        if self.painted.is_empty() {
            return None;
        }
        let idx = self
            .cursor
            .as_deref()
            .and_then(|key| self.painted.iter().position(|r| r.row_id == key))
            .unwrap_or(0);
        Some(idx)
    }

    pub fn cursor_row_id(&self) -> Option<&str> {
        self.cursor_index()
            .and_then(|i| self.painted.get(i))
            .map(|r| r.row_id.as_str())
    }

    fn move_cursor_to(&mut self, idx: usize, select: bool) {
        if let Some(row) = self.painted.get(idx) {
            let id = row.row_id.clone();
            self.cursor = Some(id.clone());
            if select {
                self.select_row(&id);
            }
        }
    }

    fn step_cursor(&mut self, delta: isize, select: bool) {
        if let Some(idx) = self.cursor_index() {
            let last = self.painted.len().saturating_sub(1);
            let target = idx.saturating_add_signed(delta).min(last);
            self.move_cursor_to(target, select);
        }
    }

    /// Move the cursor; the row it lands on becomes the sole selection.
    pub fn cursor_up(&mut self, n: usize) {
        self.step_cursor(-(n as isize), true);
    }

    pub fn cursor_down(&mut self, n: usize) {
        self.step_cursor(n as isize, true);
    }

    /// Move the cursor without touching the selection.
    pub fn cursor_up_keep(&mut self, n: usize) {
        self.step_cursor(-(n as isize), false);
    }

    pub fn cursor_down_keep(&mut self, n: usize) {
        self.step_cursor(n as isize, false);
    }

    pub fn cursor_first(&mut self) {
        self.move_cursor_to(0, true);
    }

    pub fn cursor_last(&mut self) {
        self.move_cursor_to(self.painted.len().saturating_sub(1), true);
    }

    /// Add or remove the cursor row from the selection, keeping the rest.
    pub fn toggle_cursor_selection(&mut self) {
        let Some(id) = self.cursor_row_id().map(str::to_string) else {
            return;
        };
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.painted.iter().map(|r| r.row_id.clone()).collect();
    }

    /// Keep the cursor inside a viewport of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let selected = self.cursor_index().unwrap_or(0);
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + height {
            self.scroll_offset = selected.saturating_sub(height - 1);
        }
        let max_offset = self.painted.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

impl TrackerTable for KeyedTable {
    fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
        self.painted.clear();
        self.stripes.clear();
        self.selected.clear();
        self.scroll_offset = 0;
    }

    fn update_row_data(&mut self, row: TrackerRow) {
        match self.index.get(&row.row_id) {
            Some(&i) => self.rows[i] = row,
            None => {
                self.index.insert(row.row_id.clone(), self.rows.len());
                self.rows.push(row);
            }
        }
    }

    fn update_table(&mut self, full_redraw: bool) {
        if full_redraw {
            self.scroll_offset = 0;
        }
        self.painted = self.rows.clone();
        self.stripes.truncate(self.painted.len());
    }

    fn alt_row(&mut self) {
        self.stripes = (0..self.painted.len()).map(|i| i % 2 == 1).collect();
    }

    fn selected_rows_ids(&self) -> Vec<String> {
        self.selected.clone()
    }

    fn reselect_rows(&mut self, ids: &[String]) {
        self.selected.clear();
        for id in ids {
            if self.index.contains_key(id) && !self.selected.contains(id) {
                self.selected.push(id.clone());
            }
        }
    }

    fn select_row(&mut self, id: &str) {
        if self.index.contains_key(id) {
            self.selected = vec![id.to_string()];
        }
    }

    fn row(&self, id: &str) -> Option<&TrackerRow> {
        self.index.get(id).and_then(|&i| self.rows.get(i))
    }
}
