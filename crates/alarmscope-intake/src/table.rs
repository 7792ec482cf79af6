use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use alarmscope_types::LogRow;

use crate::sink::{EventSink, SinkError};

struct TableInner {
    rows: VecDeque<LogRow>,
    capacity: usize,
    page: usize,
    page_size: usize,
}

impl TableInner {
    fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count() - 1);
    }
}

/// Paginated table of rendered event rows, shared between the intake task
/// and the render loop.
///
/// Redraws keep the currently viewed page stable while rows arrive; the
/// page index only moves on explicit navigation or when the page itself
/// disappears.
#[derive(Clone)]
pub struct EventTable {
    inner: Arc<RwLock<TableInner>>,
}

impl EventTable {
    /// Create a table holding at most `capacity` rows, `page_size` per page
    pub fn new(capacity: usize, page_size: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TableInner {
                rows: VecDeque::with_capacity(capacity.min(1024)),
                capacity: capacity.max(1),
                page: 0,
                page_size: page_size.max(1),
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().rows.is_empty()
    }

    /// Currently viewed page (zero-based)
    pub fn page(&self) -> usize {
        self.inner.read().page
    }

    pub fn page_count(&self) -> usize {
        self.inner.read().page_count()
    }

    /// Rows of the currently viewed page, oldest first
    pub fn page_rows(&self) -> Vec<LogRow> {
        let inner = self.inner.read();
        inner
            .rows
            .iter()
            .skip(inner.page * inner.page_size)
            .take(inner.page_size)
            .cloned()
            .collect()
    }

    pub fn next_page(&self) {
        let mut inner = self.inner.write();
        if inner.page + 1 < inner.page_count() {
            inner.page += 1;
        }
    }

    pub fn prev_page(&self) {
        let mut inner = self.inner.write();
        inner.page = inner.page.saturating_sub(1);
    }

    pub fn first_page(&self) {
        self.inner.write().page = 0;
    }

    pub fn last_page(&self) {
        let mut inner = self.inner.write();
        inner.page = inner.page_count() - 1;
    }

    /// Range summary for the status bar: "START to END of TOTAL"
    pub fn range_label(&self) -> String {
        let inner = self.inner.read();
        if inner.rows.is_empty() {
            return "No Results".to_string();
        }
        let start = inner.page * inner.page_size + 1;
        let end = (start + inner.page_size - 1).min(inner.rows.len());
        format!("{} to {} of {}", start, end, inner.rows.len())
    }
}

impl EventSink for EventTable {
    fn insert_row(&self, row: LogRow) -> Result<(), SinkError> {
        let mut inner = self.inner.write();
        if inner.rows.len() >= inner.capacity {
            inner.rows.pop_front();
        }
        inner.rows.push_back(row);
        Ok(())
    }

    fn redraw(&self) -> Result<(), SinkError> {
        // Standing redraw: recompute the page count, stay on the page the
        // user is looking at.
        self.inner.write().clamp_page();
        Ok(())
    }

    fn clear_all(&self) -> Result<(), SinkError> {
        let mut inner = self.inner.write();
        inner.rows.clear();
        inner.page = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> LogRow {
        LogRow::new(format!("01/01/2024 10:00:{n:02}"), format!("MSG {n}"))
    }

    fn fill(table: &EventTable, count: usize) {
        for n in 0..count {
            table.insert_row(row(n)).unwrap();
            table.redraw().unwrap();
        }
    }

    #[test]
    fn test_pagination() {
        let table = EventTable::new(100, 10);
        fill(&table, 25);

        assert_eq!(table.len(), 25);
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.page(), 0);
        assert_eq!(table.page_rows().len(), 10);

        table.last_page();
        assert_eq!(table.page(), 2);
        assert_eq!(table.page_rows().len(), 5);
        assert_eq!(table.page_rows()[0].message, "MSG 20");

        // Navigation clamps at the edges.
        table.next_page();
        assert_eq!(table.page(), 2);
        table.first_page();
        table.prev_page();
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn test_redraw_preserves_viewed_page() {
        let table = EventTable::new(100, 10);
        fill(&table, 25);

        table.next_page();
        assert_eq!(table.page(), 1);

        // New rows arrive while the user is on page two.
        fill(&table, 5);
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_redraw_clamps_vanished_page() {
        let table = EventTable::new(100, 10);
        fill(&table, 25);
        table.last_page();
        assert_eq!(table.page(), 2);

        table.clear_all().unwrap();
        assert_eq!(table.page(), 0);
        assert_eq!(table.page_count(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn test_capacity_eviction() {
        let table = EventTable::new(10, 5);
        fill(&table, 12);

        assert_eq!(table.len(), 10);
        assert_eq!(table.page_rows()[0].message, "MSG 2");
    }

    #[test]
    fn test_range_label() {
        let table = EventTable::new(100, 10);
        assert_eq!(table.range_label(), "No Results");

        fill(&table, 25);
        assert_eq!(table.range_label(), "1 to 10 of 25");

        table.last_page();
        assert_eq!(table.range_label(), "21 to 25 of 25");
    }
}
