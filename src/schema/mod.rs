//! Pet schema and write validation
//!
//! # Design Principles
//!
//! - Validation runs before any write reaches storage
//! - Absent and null are distinct payload states
//! - No undeclared fields, no writes to the row id
//! - Deterministic: the same payload always fails on the same field

mod errors;
mod types;
mod validator;
mod values;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use types::{columns, Gender, InvalidGender, NewPet, Pet, PetChanges};
pub use validator::{validate_insert, validate_update};
pub use values::{ContentValues, FieldValue};
