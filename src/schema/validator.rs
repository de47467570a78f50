//! Payload validation for pet writes
//!
//! Validation semantics:
//! - The row id is never writable
//! - No undeclared fields
//! - Inserts require `name` and `gender`
//! - Updates require nothing; only present fields are checked
//! - A present field must hold a legal value. Null is legal for `breed` only
//!
//! Checks run in a fixed order (keys, name, gender, weight, breed) so the
//! same payload always reports the same first failure.

use super::errors::{SchemaError, SchemaResult};
use super::types::{columns, Gender, NewPet, PetChanges};
use super::values::{ContentValues, FieldValue};

/// Validate an insert payload.
///
/// # Errors
///
/// Returns `SchemaError` for the first failing check; storage is never
/// consulted.
pub fn validate_insert(values: &ContentValues) -> SchemaResult<NewPet> {
    check_keys(values)?;

    let name = match values.get(columns::NAME) {
        Some(value) => name_value(value)?,
        None => return Err(SchemaError::missing_field(columns::NAME)),
    };
    let gender = match values.get(columns::GENDER) {
        Some(value) => gender_value(value)?,
        None => return Err(SchemaError::missing_field(columns::GENDER)),
    };
    let weight = values.get(columns::WEIGHT).map(weight_value).transpose()?;
    let breed = values
        .get(columns::BREED)
        .map(breed_value)
        .transpose()?
        .flatten();

    Ok(NewPet {
        name,
        breed,
        gender,
        weight,
    })
}

/// Validate a partial update payload.
///
/// An empty payload yields empty `PetChanges`.
pub fn validate_update(values: &ContentValues) -> SchemaResult<PetChanges> {
    check_keys(values)?;

    Ok(PetChanges {
        name: values.get(columns::NAME).map(name_value).transpose()?,
        gender: values.get(columns::GENDER).map(gender_value).transpose()?,
        weight: values.get(columns::WEIGHT).map(weight_value).transpose()?,
        breed: values.get(columns::BREED).map(breed_value).transpose()?,
    })
}

fn check_keys(values: &ContentValues) -> SchemaResult<()> {
    for key in values.keys() {
        if key == columns::ID || key == "id" {
            return Err(SchemaError::immutable_field(key));
        }
        if !columns::WRITABLE.contains(&key) {
            return Err(SchemaError::undeclared_field(key));
        }
    }
    Ok(())
}

fn name_value(value: &FieldValue) -> SchemaResult<String> {
    match value {
        FieldValue::Text(s) if s.trim().is_empty() => Err(SchemaError::invalid_value(
            columns::NAME,
            "non-empty string",
            "empty string",
        )),
        FieldValue::Text(s) => Ok(s.clone()),
        FieldValue::Null => Err(SchemaError::null_value(columns::NAME)),
        other => Err(SchemaError::type_mismatch(
            columns::NAME,
            "string",
            other.type_name(),
        )),
    }
}

fn gender_value(value: &FieldValue) -> SchemaResult<Gender> {
    match value {
        FieldValue::Integer(raw) => Gender::try_from(*raw).map_err(|_| {
            SchemaError::invalid_value(
                columns::GENDER,
                "one of 0 (unknown), 1 (male), 2 (female)",
                raw.to_string(),
            )
        }),
        FieldValue::Null => Err(SchemaError::null_value(columns::GENDER)),
        other => Err(SchemaError::type_mismatch(
            columns::GENDER,
            "int",
            other.type_name(),
        )),
    }
}

fn weight_value(value: &FieldValue) -> SchemaResult<i64> {
    match value {
        FieldValue::Integer(w) if *w < 0 => Err(SchemaError::invalid_value(
            columns::WEIGHT,
            "non-negative integer",
            w.to_string(),
        )),
        FieldValue::Integer(w) => Ok(*w),
        FieldValue::Null => Err(SchemaError::null_value(columns::WEIGHT)),
        other => Err(SchemaError::type_mismatch(
            columns::WEIGHT,
            "int",
            other.type_name(),
        )),
    }
}

fn breed_value(value: &FieldValue) -> SchemaResult<Option<String>> {
    match value {
        FieldValue::Text(s) => Ok(Some(s.clone())),
        FieldValue::Null => Ok(None),
        other => Err(SchemaError::type_mismatch(
            columns::BREED,
            "string or null",
            other.type_name(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;

    fn rex() -> ContentValues {
        ContentValues::new()
            .with("name", "Rex")
            .with("gender", 1)
            .with("weight", 10)
    }

    #[test]
    fn test_valid_insert() {
        let pet = validate_insert(&rex()).unwrap();
        assert_eq!(pet.name(), "Rex");
        assert_eq!(pet.gender(), Gender::Male);
        assert_eq!(pet.weight(), Some(10));
        assert_eq!(pet.breed(), None);
    }

    #[test]
    fn test_insert_requires_name() {
        let values = ContentValues::new().with("gender", 0);
        let err = validate_insert(&values).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MissingField);
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_insert_rejects_blank_name() {
        for name in ["", "   "] {
            let values = ContentValues::new().with("name", name).with("gender", 0);
            let err = validate_insert(&values).unwrap_err();
            assert_eq!(err.code(), SchemaErrorCode::InvalidValue);
            assert_eq!(err.field(), "name");
        }
    }

    #[test]
    fn test_insert_requires_gender() {
        let values = ContentValues::new().with("name", "Rex");
        let err = validate_insert(&values).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MissingField);
        assert_eq!(err.field(), "gender");
    }

    #[test]
    fn test_insert_rejects_out_of_range_gender() {
        for g in [-1, 3, 100] {
            let values = ContentValues::new().with("name", "Rex").with("gender", g);
            let err = validate_insert(&values).unwrap_err();
            assert_eq!(err.field(), "gender");
        }
    }

    #[test]
    fn test_insert_rejects_negative_weight() {
        let values = rex().with("weight", -1);
        let err = validate_insert(&values).unwrap_err();
        assert_eq!(err.field(), "weight");
        assert_eq!(err.code(), SchemaErrorCode::InvalidValue);
    }

    #[test]
    fn test_null_weight_is_not_absent() {
        let mut values = rex();
        values.put_null("weight");
        let err = validate_insert(&values).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::NullValue);
    }

    #[test]
    fn test_null_breed_is_allowed() {
        let mut values = rex();
        values.put_null("breed");
        assert_eq!(validate_insert(&values).unwrap().breed(), None);

        let changes = validate_update(&values).unwrap();
        assert_eq!(changes.breed(), Some(None));
    }

    #[test]
    fn test_id_is_immutable() {
        for key in ["_id", "id"] {
            let values = rex().with(key, 4);
            let err = validate_insert(&values).unwrap_err();
            assert_eq!(err.code(), SchemaErrorCode::ImmutableField);

            let err = validate_update(&ContentValues::new().with(key, 4)).unwrap_err();
            assert_eq!(err.code(), SchemaErrorCode::ImmutableField);
        }
    }

    #[test]
    fn test_undeclared_field_rejected() {
        let values = rex().with("color", "brown");
        let err = validate_insert(&values).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UndeclaredField);
        assert_eq!(err.field(), "color");
    }

    #[test]
    fn test_type_mismatch() {
        let values = ContentValues::new().with("name", "Rex").with("gender", "male");
        let err = validate_insert(&values).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::TypeMismatch);
    }

    #[test]
    fn test_update_absent_fields_are_not_errors() {
        let changes = validate_update(&ContentValues::new().with("weight", 12)).unwrap();
        assert_eq!(changes.weight(), Some(12));
        assert_eq!(changes.name(), None);
        assert_eq!(changes.gender(), None);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_update_empty_payload() {
        let changes = validate_update(&ContentValues::new()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_update_present_fields_still_checked() {
        let err = validate_update(&ContentValues::new().with("name", "")).unwrap_err();
        assert_eq!(err.field(), "name");

        let err = validate_update(&ContentValues::new().with("gender", 5)).unwrap_err();
        assert_eq!(err.field(), "gender");

        let err = validate_update(&ContentValues::new().with("weight", -20)).unwrap_err();
        assert_eq!(err.field(), "weight");
    }

    #[test]
    fn test_first_failure_is_deterministic() {
        let values = ContentValues::new()
            .with("name", "")
            .with("gender", 9)
            .with("weight", -1);
        for _ in 0..10 {
            assert_eq!(validate_insert(&values).unwrap_err().field(), "name");
        }
    }
}
