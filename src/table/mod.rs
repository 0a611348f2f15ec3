//! Display-oriented row projections of each resource kind.
//!
//! Every adapter owns only its row cache, its column layout and its cursor.
//! The resource data itself stays in the app's snapshot and is passed in
//! read-only on each update.

mod containers;
mod images;
mod networks;
mod volumes;

pub use containers::{format_ports, status_cell, ContainerTable};
pub use images::{format_size, parse_repo_tag, ImageTable};
pub use networks::NetworkTable;
pub use volumes::VolumeTable;

use crate::layout::{distribute_widths, Column, ColumnSpec};

/// How a row should be toned when painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowTone {
    Normal,
    Muted,
    Error,
    GroupHeader,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub tone: RowTone,
}

impl TableRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells, tone: RowTone::Normal }
    }

    pub fn with_tone(mut self, tone: RowTone) -> Self {
        self.tone = tone;
        self
    }
}

/// Rows, columns, cursor and viewport of one table.
#[derive(Clone, Debug)]
pub struct TableState {
    specs: &'static [ColumnSpec],
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    pub cursor: usize,
    pub offset: usize,
    pub height: usize,
}

impl TableState {
    pub fn new(specs: &'static [ColumnSpec]) -> Self {
        Self {
            specs,
            columns: specs
                .iter()
                .map(|s| Column { title: s.title, width: s.preferred_width })
                .collect(),
            rows: Vec::new(),
            cursor: 0,
            offset: 0,
            height: crate::layout::MIN_TABLE_HEIGHT,
        }
    }

    /// Recompute columns and viewport height for a new terminal size.
    pub fn resize(&mut self, available_width: usize, height: usize) {
        self.columns = distribute_widths(self.specs, available_width);
        self.height = height.max(1);
        self.scroll_into_view();
    }

    /// Replace the row cache, keeping the cursor in range.
    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
        self.clamp_cursor();
    }

    /// Cursor position if it addresses a row.
    pub fn selected(&self) -> Option<usize> {
        (self.cursor < self.rows.len()).then_some(self.cursor)
    }

    pub fn move_up(&mut self, n: usize) -> bool {
        let before = self.cursor;
        self.cursor = self.cursor.saturating_sub(n);
        self.scroll_into_view();
        self.cursor != before
    }

    pub fn move_down(&mut self, n: usize) -> bool {
        let before = self.cursor;
        let last = self.rows.len().saturating_sub(1);
        self.cursor = (self.cursor + n).min(last);
        self.scroll_into_view();
        self.cursor != before
    }

    pub fn go_top(&mut self) -> bool {
        self.move_up(self.cursor)
    }

    pub fn go_bottom(&mut self) -> bool {
        self.move_down(self.rows.len())
    }

    /// Rows inside the viewport, with their absolute index.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &TableRow)> {
        self.rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.height)
    }

    fn clamp_cursor(&mut self) {
        let total = self.rows.len();
        if self.cursor >= total && total > 0 {
            self.cursor = total - 1;
        } else if total == 0 {
            self.cursor = 0;
        }
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        let max_offset = self.rows.len().saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }
}

/// Format a unix timestamp as local `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(secs: i64) -> String {
    use chrono::{Local, TimeZone};
    match Local.timestamp_opt(secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NETWORK_COLUMNS;

    fn rows(n: usize) -> Vec<TableRow> {
        (0..n).map(|i| TableRow::new(vec![i.to_string()])).collect()
    }

    #[test]
    fn cursor_clamps_when_rows_shrink() {
        let mut t = TableState::new(&NETWORK_COLUMNS);
        t.set_rows(rows(10));
        t.move_down(8);
        assert_eq!(t.cursor, 8);
        t.set_rows(rows(3));
        assert_eq!(t.cursor, 2);
        t.set_rows(Vec::new());
        assert_eq!(t.cursor, 0);
        assert_eq!(t.selected(), None);
    }

    #[test]
    fn movement_stops_at_edges() {
        let mut t = TableState::new(&NETWORK_COLUMNS);
        t.set_rows(rows(3));
        assert!(!t.move_up(1));
        assert!(t.move_down(1));
        assert!(t.go_bottom());
        assert_eq!(t.cursor, 2);
        assert!(!t.move_down(1));
        assert!(t.go_top());
        assert_eq!(t.cursor, 0);
    }

    #[test]
    fn viewport_follows_cursor() {
        let mut t = TableState::new(&NETWORK_COLUMNS);
        t.resize(100, 5);
        t.set_rows(rows(20));
        t.move_down(7);
        assert_eq!(t.offset, 3);
        let visible: Vec<usize> = t.visible_rows().map(|(i, _)| i).collect();
        assert_eq!(visible, vec![3, 4, 5, 6, 7]);
        t.move_up(6);
        assert_eq!(t.offset, 1);
    }

    #[test]
    fn resize_relays_columns() {
        let mut t = TableState::new(&NETWORK_COLUMNS);
        t.resize(200, 10);
        let total: usize = t.columns.iter().map(|c| c.width).sum();
        assert_eq!(total, 200);
        assert_eq!(t.height, 10);
    }
}
