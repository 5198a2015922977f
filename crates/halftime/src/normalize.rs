use log::trace;

use serde::de::DeserializeOwned;

use serde_json::Value;

use crate::error::{NormalizationCause, NormalizationError};

/// A record built from a decoded JSON object.
///
/// The schema of a record is its `serde::Deserialize` implementation:
/// required and optional fields, their types, and nested records are all
/// declared once, on the record type, and validated by [`normalize`].
pub trait Record: DeserializeOwned {
    /// Record name reported by [`NormalizationError`]s.
    const NAME: &'static str;
}

/// Normalizes a single JSON object into a record.
///
/// # Errors
///
/// Returns a [`NormalizationError`] when the payload is not an object or
/// when one of its fields does not match the record schema.
pub fn normalize<R: Record>(value: Value) -> Result<R, NormalizationError> {
    if !value.is_object() {
        return Err(NormalizationError::new(
            R::NAME,
            "",
            NormalizationCause::NotAnObject,
        ));
    }

    let record = deserialize(R::NAME, value)?;
    trace!("Normalized a `{}` record", R::NAME);
    Ok(record)
}

/// Normalizes a JSON array of objects into records, preserving their order.
///
/// An empty array produces an empty vector.
///
/// # Errors
///
/// Returns a [`NormalizationError`] when the payload is not an array or when
/// any of its elements cannot be normalized. The error field is prefixed with
/// the element position, for example `[2].buildid`.
pub fn normalize_list<R: Record>(value: Value) -> Result<Vec<R>, NormalizationError> {
    if !value.is_array() {
        return Err(NormalizationError::new(
            R::NAME,
            "",
            NormalizationCause::NotAList,
        ));
    }

    let records: Vec<R> = deserialize(R::NAME, value)?;
    trace!("Normalized {} `{}` records", records.len(), R::NAME);
    Ok(records)
}

fn deserialize<T: DeserializeOwned>(
    record: &'static str,
    value: Value,
) -> Result<T, NormalizationError> {
    serde_path_to_error::deserialize(value)
        .map_err(|e| NormalizationError::from_deserializer(record, e))
}
