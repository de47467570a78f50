//! Pet record types
//!
//! `Pet` is a persisted row. `NewPet` and `PetChanges` are the validated
//! forms of an insert and an update payload; they can only be built by the
//! validator, so holding one means the invariants below already hold:
//! - `name` is non-blank
//! - `gender` is one of the legal values
//! - `weight` is non-negative

use std::fmt;

use serde::{Deserialize, Serialize};

/// Table and column names
pub mod columns {
    pub const TABLE: &str = "pets";
    pub const ID: &str = "_id";
    pub const NAME: &str = "name";
    pub const BREED: &str = "breed";
    pub const GENDER: &str = "gender";
    pub const WEIGHT: &str = "weight";

    /// Columns a payload may write
    pub const WRITABLE: [&str; 4] = [NAME, BREED, GENDER, WEIGHT];

    /// Column order used by every read
    pub const ALL: [&str; 5] = [ID, NAME, BREED, GENDER, WEIGHT];
}

/// Pet gender, stored as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum Gender {
    Unknown = 0,
    Male = 1,
    Female = 2,
}

impl Gender {
    /// Storage representation
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

impl From<Gender> for i64 {
    fn from(gender: Gender) -> Self {
        gender.as_i64()
    }
}

impl TryFrom<i64> for Gender {
    type Error = InvalidGender;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Gender::Unknown),
            1 => Ok(Gender::Male),
            2 => Ok(Gender::Female),
            other => Err(InvalidGender(other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Unknown => "unknown",
            Gender::Male => "male",
            Gender::Female => "female",
        };
        write!(f, "{}", label)
    }
}

/// An integer outside the gender enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid gender value {0}")]
pub struct InvalidGender(pub i64);

/// A persisted pet record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub gender: Gender,
    pub weight: i64,
}

/// A validated insert payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub(crate) name: String,
    pub(crate) breed: Option<String>,
    pub(crate) gender: Gender,
    pub(crate) weight: Option<i64>,
}

impl NewPet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn breed(&self) -> Option<&str> {
        self.breed.as_deref()
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// `None` means the column default applies
    pub fn weight(&self) -> Option<i64> {
        self.weight
    }
}

/// A validated partial update
///
/// Each field is `None` when the payload omitted it. `breed` is doubly
/// optional: `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetChanges {
    pub(crate) name: Option<String>,
    pub(crate) breed: Option<Option<String>>,
    pub(crate) gender: Option<Gender>,
    pub(crate) weight: Option<i64>,
}

impl PetChanges {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn breed(&self) -> Option<Option<&str>> {
        self.breed.as_ref().map(|b| b.as_deref())
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn weight(&self) -> Option<i64> {
        self.weight
    }

    /// True when no column would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.breed.is_none() && self.gender.is_none() && self.weight.is_none()
    }

    /// Number of columns this update writes
    pub fn len(&self) -> usize {
        [
            self.name.is_some(),
            self.breed.is_some(),
            self.gender.is_some(),
            self.weight.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}
