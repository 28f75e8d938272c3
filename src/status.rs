use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::BotError;
use crate::practicum::SubmissionRecord;

/// Review state of a submission. The set is closed: anything else the API sends
/// is a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCode {
    Approved,
    Reviewing,
    Rejected,
}

impl StatusCode {
    /// Human-facing verdict text for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            StatusCode::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            StatusCode::Reviewing => "Работа взята на проверку ревьюером.",
            StatusCode::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Approved => write!(f, "approved"),
            StatusCode::Reviewing => write!(f, "reviewing"),
            StatusCode::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for StatusCode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(StatusCode::Approved),
            "reviewing" => Ok(StatusCode::Reviewing),
            "rejected" => Ok(StatusCode::Rejected),
            other => Err(BotError::UnknownStatus(other.to_string())),
        }
    }
}

/// A submission whose status was recognised, with the message to send about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub status: StatusCode,
    pub message: String,
}

/// Reads just the `status` field of a raw record, if it is a known code.
pub fn peek_status(record: &Value) -> Option<StatusCode> {
    StatusCode::deserialize(record.get("status")?).ok()
}

/// Turns a raw submission record into a chat message.
///
/// Fails with `MalformedResponse` when `homework_name` or `status` is missing and
/// with `UnknownStatus` when the status is outside the verdict table.
pub fn interpret(record: &Value) -> Result<Interpretation, BotError> {
    let record = SubmissionRecord::from_value(record)?;
    debug!(id = ?record.id, name = %record.name, status = %record.status, "latest submission");
    let status: StatusCode = record.status.parse()?;
    Ok(Interpretation {
        status,
        message: format!(
            "Изменился статус проверки работы \"{}\". {}",
            record.name,
            status.verdict()
        ),
    })
}
