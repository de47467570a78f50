//! Router + store dispatch
//!
//! Every operation resolves its path first. An item path (`pets/#`) always
//! replaces the caller's selection with `_id = <id>`, so item operations can
//! never reach another row.

use crate::observability::Event;
use crate::router::{ContentUri, UriMatcher};
use crate::schema::{validate_insert, validate_update, ContentValues};
use crate::store::{PetCursor, PetStore, Selection};

use super::contract::{PetRoute, CONTENT_AUTHORITY};
use super::errors::{Operation, ProviderError, ProviderResult};

/// Result of an insert that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row written; `uri` addresses the new row
    Created { id: i64, uri: ContentUri },
    /// Storage refused the write. The failure has been logged.
    Failed,
}

impl InsertOutcome {
    pub fn id(&self) -> Option<i64> {
        match self {
            InsertOutcome::Created { id, .. } => Some(*id),
            InsertOutcome::Failed => None,
        }
    }

    pub fn uri(&self) -> Option<&ContentUri> {
        match self {
            InsertOutcome::Created { uri, .. } => Some(uri),
            InsertOutcome::Failed => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, InsertOutcome::Created { .. })
    }
}

/// A resolved path
struct Target {
    uri: ContentUri,
    route: PetRoute,
}

impl Target {
    /// The selection an operation on this target must use
    fn selection<'a>(&self, caller: Option<&'a Selection>, forced: &'a mut Option<Selection>) -> Option<&'a Selection> {
        match self.route {
            PetRoute::Pets => caller,
            PetRoute::PetId => {
                // Routing only accepted an all-digit segment; `resolve` has
                // already rejected ids that overflow.
                let id = self.uri.parse_id().unwrap_or_default();
                Some(forced.insert(Selection::by_id(id)))
            }
        }
    }
}

/// The pets resource: a route table in front of a record store
#[derive(Debug)]
pub struct PetProvider {
    matcher: UriMatcher<PetRoute>,
    store: PetStore,
}

impl PetProvider {
    pub fn new(store: PetStore) -> Self {
        let mut matcher = UriMatcher::with_authority(CONTENT_AUTHORITY);
        matcher.register(PetRoute::Pets.pattern(), PetRoute::Pets);
        matcher.register(PetRoute::PetId.pattern(), PetRoute::PetId);

        Self { matcher, store }
    }

    pub fn store(&self) -> &PetStore {
        &self.store
    }

    /// Route code for `uri`, or `None` for no match
    pub fn route(&self, uri: &str) -> Option<PetRoute> {
        self.matcher.match_path(uri)
    }

    fn resolve(&self, operation: Operation, raw: &str) -> ProviderResult<Target> {
        let uri = ContentUri::parse(raw);
        let route = self.matcher.match_uri(&uri);

        match route {
            Some(PetRoute::PetId) if uri.parse_id().is_none() => {}
            Some(route) => return Ok(Target { uri, route }),
            None => {}
        }

        tracing::warn!(
            event = %Event::RequestRejected,
            operation = %operation,
            uri = raw,
            "no route for request"
        );
        Err(ProviderError::unsupported(operation, raw))
    }

    /// Read rows addressed by `uri`.
    ///
    /// On an item path the caller's `selection` is ignored.
    pub fn query(
        &self,
        uri: &str,
        selection: Option<&Selection>,
        sort_order: Option<&str>,
    ) -> ProviderResult<PetCursor> {
        let target = self.resolve(Operation::Query, uri)?;
        let mut forced = None;
        let selection = target.selection(selection, &mut forced);

        tracing::debug!(event = %Event::QueryReceived, uri, "query");
        Ok(self.store.query(selection, sort_order)?)
    }

    /// Create a row. Only legal on the collection path.
    ///
    /// Validation errors are returned as `Err`. A storage failure on a valid
    /// payload is not: it is logged and reported as `InsertOutcome::Failed`.
    pub fn insert(&self, uri: &str, values: &ContentValues) -> ProviderResult<InsertOutcome> {
        let target = self.resolve(Operation::Insert, uri)?;
        if target.route != PetRoute::Pets {
            tracing::warn!(
                event = %Event::RequestRejected,
                operation = %Operation::Insert,
                uri,
                "insert on item path"
            );
            return Err(ProviderError::unsupported(Operation::Insert, uri));
        }

        let pet = validate_insert(values).map_err(|e| self.rejected(Operation::Insert, uri, e))?;

        match self.store.insert(&pet) {
            Ok(id) => {
                let uri = target.uri.with_appended_id(id);
                tracing::info!(event = %Event::PetInserted, id, uri = %uri, "inserted pet");
                Ok(InsertOutcome::Created { id, uri })
            }
            Err(e) => {
                tracing::error!(
                    event = %Event::PetInsertFailed,
                    uri,
                    code = e.code(),
                    error = %e,
                    "failed to insert row"
                );
                Ok(InsertOutcome::Failed)
            }
        }
    }

    /// Apply a partial update to the rows addressed by `uri`.
    ///
    /// Only present fields are validated. An empty payload returns 0 without
    /// touching storage.
    pub fn update(
        &self,
        uri: &str,
        values: &ContentValues,
        selection: Option<&Selection>,
    ) -> ProviderResult<usize> {
        let target = self.resolve(Operation::Update, uri)?;
        let changes = validate_update(values).map_err(|e| self.rejected(Operation::Update, uri, e))?;
        if changes.is_empty() {
            return Ok(0);
        }

        let mut forced = None;
        let selection = target.selection(selection, &mut forced);
        let rows = self.store.update(&changes, selection)?;

        tracing::info!(event = %Event::PetsUpdated, uri, rows, columns = changes.len(), "updated pets");
        Ok(rows)
    }

    /// Delete the rows addressed by `uri`. The collection path with no
    /// selection deletes every row.
    pub fn delete(&self, uri: &str, selection: Option<&Selection>) -> ProviderResult<usize> {
        let target = self.resolve(Operation::Delete, uri)?;
        let mut forced = None;
        let selection = target.selection(selection, &mut forced);
        let rows = self.store.delete(selection)?;

        tracing::info!(event = %Event::PetsDeleted, uri, rows, "deleted pets");
        Ok(rows)
    }

    /// Type identifier of what `uri` addresses.
    pub fn get_type(&self, uri: &str) -> ProviderResult<&'static str> {
        Ok(self.resolve(Operation::GetType, uri)?.route.content_type())
    }

    fn rejected(&self, operation: Operation, uri: &str, err: crate::schema::SchemaError) -> ProviderError {
        tracing::warn!(
            event = %Event::RequestRejected,
            operation = %operation,
            uri,
            field = err.field(),
            code = err.code().code(),
            "payload failed validation"
        );
        ProviderError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::contract::{CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE};
    use crate::store::StoreConfig;

    fn provider() -> PetProvider {
        PetProvider::new(PetStore::new(StoreConfig::in_memory()))
    }

    fn rex() -> ContentValues {
        ContentValues::new()
            .with("name", "Rex")
            .with("gender", 1)
            .with("weight", 10)
    }

    #[test]
    fn test_routes() {
        let provider = provider();
        assert_eq!(provider.route("/pets"), Some(PetRoute::Pets));
        assert_eq!(provider.route("/pets/4"), Some(PetRoute::PetId));
        assert_eq!(provider.route("/owners"), None);
    }

    #[test]
    fn test_get_type() {
        let provider = provider();
        assert_eq!(provider.get_type("/pets").unwrap(), CONTENT_LIST_TYPE);
        assert_eq!(provider.get_type("/pets/9").unwrap(), CONTENT_ITEM_TYPE);
        assert!(matches!(
            provider.get_type("/unknown"),
            Err(ProviderError::UnsupportedTarget { operation: Operation::GetType, .. })
        ));
    }

    #[test]
    fn test_insert_returns_item_uri() {
        let provider = provider();
        let outcome = provider
            .insert("content://com.example.android.pets/pets", &rex())
            .unwrap();
        assert_eq!(outcome.id(), Some(1));
        assert_eq!(
            outcome.uri().unwrap().to_string(),
            "content://com.example.android.pets/pets/1"
        );
    }

    #[test]
    fn test_insert_on_item_path_rejected() {
        let provider = provider();
        let err = provider.insert("/pets/5", &rex()).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UnsupportedTarget { operation: Operation::Insert, .. }
        ));
        assert!(!provider.store().is_open());
    }

    #[test]
    fn test_validation_runs_before_storage() {
        let provider = provider();
        let err = provider
            .insert("/pets", &ContentValues::new().with("gender", 1))
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
        assert!(!provider.store().is_open());
    }

    #[test]
    fn test_overflowing_id_is_unsupported() {
        let provider = provider();
        let err = provider.delete("/pets/99999999999999999999", None).unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedTarget { .. }));
    }

    #[test]
    fn test_item_path_overrides_selection() {
        let provider = provider();
        provider.insert("/pets", &rex()).unwrap();
        provider.insert("/pets", &rex().with("name", "Tom")).unwrap();

        let everything = Selection::raw("1 = 1");
        let pets = provider
            .query("/pets/2", Some(&everything), None)
            .unwrap()
            .collect_all()
            .unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Tom");

        assert_eq!(provider.delete("/pets/2", Some(&everything)).unwrap(), 1);
        assert_eq!(provider.query("/pets", None, None).unwrap().count(), 1);
    }

    #[test]
    fn test_storage_failure_is_not_an_error() {
        let store = PetStore::new(StoreConfig::new("/nonexistent-dir/definitely/pets.db"));
        let provider = PetProvider::new(store);
        let outcome = provider.insert("/pets", &rex()).unwrap();
        assert_eq!(outcome, InsertOutcome::Failed);
        assert!(!outcome.is_created());
    }
}
