//! Data types for the Practicum homework status API.
//!
//! The API is loosely typed, so records stay as raw JSON until the interpreter
//! pulls the fields it needs out of them.

use serde_json::Value;

use crate::error::{BotError, Malformed};

/// A validated `homework_statuses` response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Submissions, most recent first.
    pub homeworks: Vec<Value>,
    /// Server time to use as the next `from_date`.
    pub current_date: Option<i64>,
}

impl ApiResponse {
    /// The most recent submission. The API's ordering is trusted as-is.
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// One submission snapshot with the fields the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Opaque record id, rendered as text whether it came as a string or a number.
    pub id: Option<String>,
    pub name: String,
    pub status: String,
}

impl SubmissionRecord {
    /// Extracts a record from raw JSON.
    ///
    /// The display name is read from `homework_name`, falling back to `name`.
    pub fn from_value(raw: &Value) -> Result<Self, BotError> {
        let object = raw
            .as_object()
            .ok_or(BotError::MalformedResponse(Malformed::NotAnObject))?;

        let name = object
            .get("homework_name")
            .or_else(|| object.get("name"))
            .ok_or(BotError::MalformedResponse(Malformed::MissingField(
                "homework_name",
            )))?
            .as_str()
            .ok_or(BotError::MalformedResponse(Malformed::WrongFieldType(
                "homework_name",
            )))?
            .to_string();

        let status = object
            .get("status")
            .ok_or(BotError::MalformedResponse(Malformed::MissingField("status")))?
            .as_str()
            .ok_or(BotError::MalformedResponse(Malformed::WrongFieldType("status")))?
            .to_string();

        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self { id, name, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_from_api_format() {
        let raw = json!({
            "id": 124,
            "status": "rejected",
            "homework_name": "username__hw_python_oop.zip",
            "reviewer_comment": "Код не по PEP8, нужно исправить",
            "date_updated": "2020-02-13T16:42:47Z",
            "lesson_name": "Итоговый проект"
        });
        let record = SubmissionRecord::from_value(&raw).unwrap();
        assert_eq!(record.id.as_deref(), Some("124"));
        assert_eq!(record.name, "username__hw_python_oop.zip");
        assert_eq!(record.status, "rejected");
    }

    #[test]
    fn record_accepts_name_alias() {
        let record =
            SubmissionRecord::from_value(&json!({"name": "hw1", "status": "reviewing"})).unwrap();
        assert_eq!(record.name, "hw1");
        assert_eq!(record.id, None);
    }

    #[test]
    fn record_requires_status() {
        let err = SubmissionRecord::from_value(&json!({"homework_name": "hw1"})).unwrap_err();
        assert_eq!(
            err,
            BotError::MalformedResponse(Malformed::MissingField("status"))
        );
    }

    #[test]
    fn record_requires_name() {
        let err = SubmissionRecord::from_value(&json!({"status": "approved"})).unwrap_err();
        assert_eq!(
            err,
            BotError::MalformedResponse(Malformed::MissingField("homework_name"))
        );
    }

    #[test]
    fn latest_is_first_element() {
        let response = ApiResponse {
            homeworks: vec![json!({"status": "approved"}), json!({"status": "rejected"})],
            current_date: None,
        };
        assert_eq!(response.latest(), Some(&json!({"status": "approved"})));
    }
}
