//! CRUD against the pets table
//!
//! The store trusts its inputs: `NewPet` and `PetChanges` can only come out
//! of the validator, and selections are passed through untouched. Each call
//! is a single statement, so it is atomic exactly as far as SQLite makes one
//! statement atomic.

use std::sync::Arc;

use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;

use crate::schema::{columns, NewPet, PetChanges};

use super::config::StoreConfig;
use super::cursor::PetCursor;
use super::database::PetDatabase;
use super::errors::StoreResult;
use super::selection::{push_where, Selection};

/// Record store over one SQLite table
///
/// `Clone` is cheap: clones share the same lazily opened database.
#[derive(Debug, Clone)]
pub struct PetStore {
    db: Arc<PetDatabase>,
}

impl PetStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            db: Arc::new(PetDatabase::new(config)),
        }
    }

    /// Open the backing database now (creating the table) instead of on
    /// first use.
    pub fn open(&self) -> StoreResult<()> {
        self.db.open()
    }

    /// True once any statement has opened the backing database
    pub fn is_open(&self) -> bool {
        self.db.is_open()
    }

    /// Select rows matching `selection`, ordered by `sort_order`.
    ///
    /// The first window is fetched eagerly so malformed selections and sort
    /// orders fail here rather than on first iteration. Rows with equal sort
    /// keys come back in id order so paging never skips or repeats a row.
    pub fn query(&self, selection: Option<&Selection>, sort_order: Option<&str>) -> StoreResult<PetCursor> {
        let mut sql = format!("SELECT {} FROM {}", columns::ALL.join(", "), columns::TABLE);
        let mut args = Vec::new();
        push_where(&mut sql, &mut args, selection);

        match sort_order.map(str::trim).filter(|s| !s.is_empty()) {
            Some(order) => sql.push_str(&format!(" ORDER BY {}, {}", order, columns::ID)),
            None => sql.push_str(&format!(" ORDER BY {}", columns::ID)),
        }
        sql.push_str(" LIMIT ? OFFSET ?");

        let mut cursor = PetCursor::new(
            Arc::clone(&self.db),
            sql,
            args,
            self.db.config().cursor_window,
        );
        cursor.fill()?;
        Ok(cursor)
    }

    /// Insert a validated pet and return its new id.
    pub fn insert(&self, pet: &NewPet) -> StoreResult<i64> {
        let mut names = vec![columns::NAME, columns::BREED, columns::GENDER];
        let mut values = vec![
            SqlValue::Text(pet.name().to_string()),
            pet.breed().map_or(SqlValue::Null, |b| SqlValue::Text(b.to_string())),
            SqlValue::Integer(pet.gender().as_i64()),
        ];
        if let Some(weight) = pet.weight() {
            names.push(columns::WEIGHT);
            values.push(SqlValue::Integer(weight));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            columns::TABLE,
            names.join(", "),
            vec!["?"; names.len()].join(", ")
        );

        self.db.with_connection("insert", |conn| {
            conn.execute(&sql, params_from_iter(values.iter()))?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Apply `changes` to every row matching `selection`.
    ///
    /// Empty changes return 0 without touching (or opening) storage.
    pub fn update(&self, changes: &PetChanges, selection: Option<&Selection>) -> StoreResult<usize> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut assignments = Vec::with_capacity(changes.len());
        let mut params = Vec::with_capacity(changes.len());
        if let Some(name) = changes.name() {
            assignments.push(columns::NAME);
            params.push(SqlValue::Text(name.to_string()));
        }
        if let Some(breed) = changes.breed() {
            assignments.push(columns::BREED);
            params.push(breed.map_or(SqlValue::Null, |b| SqlValue::Text(b.to_string())));
        }
        if let Some(gender) = changes.gender() {
            assignments.push(columns::GENDER);
            params.push(SqlValue::Integer(gender.as_i64()));
        }
        if let Some(weight) = changes.weight() {
            assignments.push(columns::WEIGHT);
            params.push(SqlValue::Integer(weight));
        }

        let set_clause = assignments
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!("UPDATE {} SET {}", columns::TABLE, set_clause);
        push_where(&mut sql, &mut params, selection);

        self.db.with_connection("update", |conn| {
            conn.execute(&sql, params_from_iter(params.iter()))
        })
    }

    /// Delete every row matching `selection`; no selection deletes all rows.
    pub fn delete(&self, selection: Option<&Selection>) -> StoreResult<usize> {
        let mut sql = format!("DELETE FROM {}", columns::TABLE);
        let mut params = Vec::new();
        push_where(&mut sql, &mut params, selection);

        self.db.with_connection("delete", |conn| {
            conn.execute(&sql, params_from_iter(params.iter()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{validate_insert, validate_update, ContentValues, Gender, Pet};

    fn store() -> PetStore {
        PetStore::new(StoreConfig::in_memory())
    }

    fn new_pet(name: &str, gender: i64, weight: i64) -> NewPet {
        validate_insert(
            &ContentValues::new()
                .with("name", name)
                .with("gender", gender)
                .with("weight", weight),
        )
        .unwrap()
    }

    fn all(store: &PetStore) -> Vec<Pet> {
        store.query(None, None).unwrap().collect_all().unwrap()
    }

    #[test]
    fn test_insert_assigns_fresh_ids() {
        let store = store();
        let a = store.insert(&new_pet("Rex", 1, 10)).unwrap();
        let b = store.insert(&new_pet("Tom", 2, 4)).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn test_weight_defaults_to_zero() {
        let store = store();
        let pet = validate_insert(&ContentValues::new().with("name", "Rex").with("gender", 0)).unwrap();
        store.insert(&pet).unwrap();
        assert_eq!(all(&store)[0].weight, 0);
    }

    #[test]
    fn test_query_with_selection_and_sort() {
        let store = store();
        store.insert(&new_pet("Rex", 1, 10)).unwrap();
        store.insert(&new_pet("Alf", 1, 3)).unwrap();
        store.insert(&new_pet("Tom", 2, 4)).unwrap();

        let selection = Selection::with_text_args("gender = ?", ["1"]);
        let pets = store
            .query(Some(&selection), Some("name ASC"))
            .unwrap()
            .collect_all()
            .unwrap();
        let names: Vec<_> = pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alf", "Rex"]);
    }

    #[test]
    fn test_malformed_sort_fails_at_query_time() {
        let store = store();
        let err = store.query(None, Some("no_such_column")).unwrap_err();
        assert!(err.is_invalid_statement());
    }

    #[test]
    fn test_placeholder_mismatch_is_invalid_statement() {
        let store = store();
        store.insert(&new_pet("Rex", 1, 10)).unwrap();

        let missing_arg = Selection::raw("name = ?");
        assert!(store.query(Some(&missing_arg), None).unwrap_err().is_invalid_statement());

        let bad_clause = Selection::raw("name ==== 'Rex'");
        let changes = validate_update(&ContentValues::new().with("weight", 1)).unwrap();
        assert!(store.update(&changes, Some(&bad_clause)).unwrap_err().is_invalid_statement());
        assert!(store.delete(Some(&bad_clause)).unwrap_err().is_invalid_statement());

        assert_eq!(all(&store).len(), 1);
    }

    #[test]
    fn test_cursor_pages_through_windows() {
        let store = PetStore::new(StoreConfig::in_memory().with_cursor_window(3));
        for i in 0..10 {
            store.insert(&new_pet(&format!("pet{}", i), 0, i)).unwrap();
        }

        let cursor = store.query(None, Some("weight DESC")).unwrap();
        assert_eq!(cursor.window(), 3);
        assert_eq!(cursor.fetched(), 3);
        let weights: Vec<i64> = cursor.map(|p| p.unwrap().weight).collect();
        assert_eq!(weights, (0..10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_cursor_is_live_between_windows() {
        let store = PetStore::new(StoreConfig::in_memory().with_cursor_window(2));
        for i in 0..4 {
            store.insert(&new_pet(&format!("pet{}", i), 0, i)).unwrap();
        }

        let mut cursor = store.query(None, None).unwrap();
        assert_eq!(cursor.next().unwrap().unwrap().name, "pet0");

        // Written after the first window was fetched, visible to the next one.
        store.insert(&new_pet("late", 0, 99)).unwrap();

        let rest: Vec<String> = cursor.map(|p| p.unwrap().name).collect();
        assert_eq!(rest, vec!["pet1", "pet2", "pet3", "late"]);
    }

    #[test]
    fn test_update_changes_only_present_columns() {
        let store = store();
        let id = store.insert(&new_pet("Rex", 1, 10)).unwrap();

        let changes = validate_update(&ContentValues::new().with("weight", 12)).unwrap();
        let rows = store.update(&changes, Some(&Selection::by_id(id))).unwrap();
        assert_eq!(rows, 1);

        let pet = &all(&store)[0];
        assert_eq!(pet.weight, 12);
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.gender, Gender::Male);
    }

    #[test]
    fn test_empty_update_does_not_open_storage() {
        let store = store();
        let rows = store.update(&PetChanges::default(), None).unwrap();
        assert_eq!(rows, 0);
        assert!(!store.is_open());
    }

    #[test]
    fn test_update_can_clear_breed() {
        let store = store();
        let values = ContentValues::new()
            .with("name", "Rex")
            .with("gender", 1)
            .with("breed", "Beagle");
        store.insert(&validate_insert(&values).unwrap()).unwrap();

        let mut clear = ContentValues::new();
        clear.put_null("breed");
        store.update(&validate_update(&clear).unwrap(), None).unwrap();
        assert_eq!(all(&store)[0].breed, None);
    }

    #[test]
    fn test_delete_by_selection_and_all() {
        let store = store();
        store.insert(&new_pet("Rex", 1, 10)).unwrap();
        store.insert(&new_pet("Tom", 2, 4)).unwrap();
        store.insert(&new_pet("Alf", 1, 3)).unwrap();

        let removed = store
            .delete(Some(&Selection::with_text_args("weight < ?", ["5"])))
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.delete(None).unwrap(), 1);
        assert!(all(&store).is_empty());
    }
}
