//! # Pets Provider
//!
//! The data-access surface: resolves a resource path to a route, validates
//! mutation payloads and dispatches to the record store.
//!
//! | Path         | query | insert | update | delete |
//! |--------------|-------|--------|--------|--------|
//! | `pets`       | all   | create | bulk   | bulk   |
//! | `pets/{id}`  | one   | reject | one    | one    |

mod contract;
mod errors;
mod pet_provider;

pub use contract::{
    content_uri, PetRoute, CONTENT_AUTHORITY, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, PATH_PETS,
};
pub use errors::{Operation, ProviderError, ProviderResult};
pub use pet_provider::{InsertOutcome, PetProvider};
