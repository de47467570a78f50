//! Public names of the pets resource

use crate::router::ContentUri;

/// Authority accepted in `content://` URIs
pub const CONTENT_AUTHORITY: &str = "com.example.android.pets";

/// Path segment of the pets collection
pub const PATH_PETS: &str = "pets";

/// Type identifier of a list of pet records
pub const CONTENT_LIST_TYPE: &str = "vnd.android.cursor.dir/com.example.android.pets/pets";

/// Type identifier of a single pet record
pub const CONTENT_ITEM_TYPE: &str = "vnd.android.cursor.item/com.example.android.pets/pets";

/// `content://com.example.android.pets/pets`
pub fn content_uri() -> ContentUri {
    ContentUri::new(CONTENT_AUTHORITY, &[PATH_PETS])
}

/// Route codes registered by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PetRoute {
    /// The whole table: `pets`
    Pets,
    /// One row: `pets/#`
    PetId,
}

impl PetRoute {
    /// Pattern this route is registered under
    pub fn pattern(self) -> &'static str {
        match self {
            PetRoute::Pets => "pets",
            PetRoute::PetId => "pets/#",
        }
    }

    /// Type identifier of what the route addresses
    pub fn content_type(self) -> &'static str {
        match self {
            PetRoute::Pets => CONTENT_LIST_TYPE,
            PetRoute::PetId => CONTENT_ITEM_TYPE,
        }
    }
}
