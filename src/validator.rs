//! Shape checks for the raw status API payload.

use serde_json::Value;

use crate::error::{BotError, Malformed};
use crate::practicum::ApiResponse;

/// Validates a raw payload and converts it into an [`ApiResponse`].
///
/// A `code` or `error` key at the top level is a server-side fault and wins over
/// the `homeworks` checks.
pub fn validate(raw: &Value) -> Result<ApiResponse, BotError> {
    let object = raw
        .as_object()
        .ok_or(BotError::MalformedResponse(Malformed::NotAnObject))?;

    if let Some(fault) = server_fault(raw) {
        return Err(fault);
    }

    let homeworks = object
        .get("homeworks")
        .ok_or(BotError::MalformedResponse(Malformed::MissingField("homeworks")))?
        .as_array()
        .ok_or(BotError::MalformedResponse(Malformed::WrongFieldType("homeworks")))?
        .clone();

    let current_date = match object.get("current_date") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or(BotError::MalformedResponse(
            Malformed::WrongFieldType("current_date"),
        ))?),
    };

    Ok(ApiResponse {
        homeworks,
        current_date,
    })
}

/// Returns a [`BotError::ServerFault`] if the payload is the API's error shape.
///
/// The Practicum API sends `{"code": ..., "message": ...}` for bad requests and
/// `{"error": {"error": ...}}` for bad parameters; both shapes are flattened to text.
pub fn server_fault(raw: &Value) -> Option<BotError> {
    let object = raw.as_object()?;
    let key = ["code", "error"]
        .into_iter()
        .find(|key| object.contains_key(*key))?;

    let mut parts = vec![format!("{key}: {}", describe(&object[key]))];
    if let Some(message) = object.get("message") {
        parts.push(describe(message));
    }
    Some(BotError::ServerFault(parts.join(", ")))
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("error") {
            Some(inner) => describe(inner),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}
