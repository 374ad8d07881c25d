use std::collections::VecDeque;

use rusqlite::params_from_iter;
use tracing::debug;

use crate::error::TableError;
use crate::table::Table;

/// A lazy, forward-only full-table scan.
///
/// Produced by [`Table::all`]. Rows are fetched one page at a time by
/// advancing a monotonic id cursor, so the whole table is never held in
/// memory; each page acquires its own connection and releases it before the
/// page is yielded. A page shorter than the configured page size ends the
/// scan; a full page always triggers one more fetch, which may come back
/// empty.
///
/// Errors end the scan: after an `Err` item the iterator is fused.
pub struct Scan<'t, T> {
    table: &'t Table<T>,
    cursor: i64,
    buffer: VecDeque<T>,
    done: bool,
}

impl<'t, T> Scan<'t, T> {
    pub(crate) fn new(table: &'t Table<T>) -> Self {
        Self {
            table,
            cursor: i64::MIN,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    fn fetch_page(&mut self) -> Result<(), TableError> {
        let stmt = self.table.page_statement(self.cursor);
        debug!(sql = %stmt.sql, cursor = self.cursor, "scan page");
        let conn = self.table.provider().connection()?;
        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared.query_map(params_from_iter(stmt.binds.iter()), |row| {
            // the cursor id is selected first, ahead of the row's own columns
            let id: i64 = row.get(0)?;
            let entity = self.table.map_row(row)?;
            Ok((id, entity))
        })?;

        let mut fetched = 0;
        for row in rows {
            let (id, entity) = row?;
            self.cursor = id;
            self.buffer.push_back(entity);
            fetched += 1;
        }
        if fetched < self.table.page_size() {
            self.done = true;
        }
        Ok(())
    }
}

impl<T> Iterator for Scan<'_, T> {
    type Item = Result<T, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entity) = self.buffer.pop_front() {
                return Some(Ok(entity));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.fetch_page() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}
