//! Windowed result cursor
//!
//! A `PetCursor` is a lazy, finite, one-shot iterator over the rows a query
//! selects. Rows are fetched `window` at a time with `LIMIT`/`OFFSET`, taking
//! the connection lock once per window. The cursor is live, not a snapshot:
//! writes committed between windows can shift or change the rows it sees.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::Arc;

use rusqlite::types::{Type, Value as SqlValue};
use rusqlite::{params_from_iter, Row};

use crate::schema::{Gender, Pet};

use super::database::PetDatabase;
use super::errors::StoreResult;

/// Map a row selected in `columns::ALL` order.
pub(crate) fn row_to_pet(row: &Row<'_>) -> rusqlite::Result<Pet> {
    let raw_gender: i64 = row.get(3)?;
    let gender = Gender::try_from(raw_gender)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e)))?;

    Ok(Pet {
        id: row.get(0)?,
        name: row.get(1)?,
        breed: row.get(2)?,
        gender,
        weight: row.get(4)?,
    })
}

/// Lazy iterator over query results
#[derive(Debug)]
pub struct PetCursor {
    db: Arc<PetDatabase>,
    sql: String,
    args: Vec<SqlValue>,
    window: usize,
    offset: usize,
    buffer: VecDeque<Pet>,
    exhausted: bool,
}

impl PetCursor {
    /// `sql` must end with `LIMIT ? OFFSET ?`; the cursor binds those two
    /// after `args`.
    pub(crate) fn new(db: Arc<PetDatabase>, sql: String, args: Vec<SqlValue>, window: usize) -> Self {
        Self {
            db,
            sql,
            args,
            window: window.max(1),
            offset: 0,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Rows fetched per window
    pub fn window(&self) -> usize {
        self.window
    }

    /// Rows fetched from storage so far
    pub fn fetched(&self) -> usize {
        self.offset
    }

    /// Fetch the next window into the buffer.
    pub(crate) fn fill(&mut self) -> StoreResult<()> {
        let mut params = self.args.clone();
        params.push(SqlValue::Integer(self.window as i64));
        params.push(SqlValue::Integer(self.offset as i64));

        let sql = &self.sql;
        let rows = self.db.with_connection("query", |conn| {
            let mut stmt = conn.prepare_cached(sql)?;
            let rows = stmt.query_map(params_from_iter(params.iter()), row_to_pet)?;
            rows.collect::<rusqlite::Result<Vec<Pet>>>()
        })?;

        if rows.len() < self.window {
            self.exhausted = true;
        }
        self.offset += rows.len();
        self.buffer.extend(rows);
        Ok(())
    }

    /// Drain the remaining rows.
    pub fn collect_all(self) -> StoreResult<Vec<Pet>> {
        self.collect()
    }
}

impl Iterator for PetCursor {
    type Item = StoreResult<Pet>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pet) = self.buffer.pop_front() {
            return Some(Ok(pet));
        }
        if self.exhausted {
            return None;
        }
        if let Err(e) = self.fill() {
            self.exhausted = true;
            return Some(Err(e));
        }
        self.buffer.pop_front().map(Ok)
    }
}

impl FusedIterator for PetCursor {}
