//! Shared response envelopes and serde helpers

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{OgoError, Result};
use crate::ogo::traits::PagedResponse;

/// List envelope: `{"content": [...], "totalElements": n}`
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

impl<T> PagedResponse<T> for Page<T> {
    fn into_items(self) -> Vec<T> {
        self.content
    }

    fn total(&self) -> Option<u64> {
        self.total_elements
    }
}

/// Decode `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What a create or update call answered with
#[derive(Debug, PartialEq)]
pub(crate) enum MutationOutcome<T> {
    /// The body carried the resource
    Resource(T),
    /// The body was empty or an acknowledgement without the resource
    Acknowledged,
}

const ERROR_FLAGS: &[&str] = &["hasError", "error"];
const COUNT_FIELDS: &[&str] = &["count", "totalElements"];

/// Interpret a mutation response body
///
/// An envelope with a set error flag or a zero count is a failure carrying
/// the envelope's message. An envelope that only acknowledges the change (or
/// an empty body) means the caller must read the resource back.
pub(crate) fn parse_mutation<T>(body: &str, what: &str) -> Result<MutationOutcome<T>>
where
    T: DeserializeOwned,
{
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(MutationOutcome::Acknowledged);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    let Some(object) = value.as_object() else {
        return Ok(MutationOutcome::Resource(serde_json::from_value(value)?));
    };

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    let failed = ERROR_FLAGS
        .iter()
        .any(|key| object.get(*key).and_then(Value::as_bool) == Some(true));
    if failed {
        return Err(OgoError::Envelope(message.unwrap_or_else(|| {
            format!("{} request rejected without a message: {}", what, trimmed)
        })));
    }

    let count = COUNT_FIELDS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_u64));
    let is_envelope = count.is_some()
        || ERROR_FLAGS
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_boolean));

    if !is_envelope {
        return Ok(MutationOutcome::Resource(serde_json::from_value(value)?));
    }

    if count == Some(0) {
        return Err(OgoError::Envelope(match message {
            Some(msg) => format!("no {} affected: {}", what, msg),
            None => format!("no {} affected", what),
        }));
    }

    match object.get("content") {
        Some(content) if content.is_object() => Ok(MutationOutcome::Resource(
            serde_json::from_value(content.clone())?,
        )),
        _ => Ok(MutationOutcome::Acknowledged),
    }
}
