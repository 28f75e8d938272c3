use thiserror::Error;

/// Errors raised while polling the status API.
///
/// Everything except [`BotError::MissingCredential`] is a reportable error: the
/// poll loop catches it and notifies the chat once per distinct text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("Missing required environment variables: {}", .names.join(", "))]
    MissingCredential { names: Vec<String> },

    #[error("Status API request failed: {0}")]
    TransportFault(String),

    #[error("Status API reported an error: {0}")]
    ServerFault(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(Malformed),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),
}

/// Which shape check a malformed payload failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("response is not an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` has the wrong type")]
    WrongFieldType(&'static str),

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
}

/// Flat classification of [`BotError`] so callers can branch on the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    TransportFault,
    ServerFault,
    MalformedResponse,
    UnknownStatus,
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::MissingCredential { .. } => ErrorKind::MissingCredential,
            BotError::TransportFault(_) => ErrorKind::TransportFault,
            BotError::ServerFault(_) => ErrorKind::ServerFault,
            BotError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            BotError::UnknownStatus(_) => ErrorKind::UnknownStatus,
        }
    }
}

// The request URL carries the moving cursor; dropping it keeps repeated failures
// textually identical.
impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::TransportFault(err.without_url().to_string())
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingCredential => write!(f, "MissingCredential"),
            ErrorKind::TransportFault => write!(f, "TransportFault"),
            ErrorKind::ServerFault => write!(f, "ServerFault"),
            ErrorKind::MalformedResponse => write!(f, "MalformedResponse"),
            ErrorKind::UnknownStatus => write!(f, "UnknownStatus"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_lists_names() {
        let err = BotError::MissingCredential {
            names: vec!["PRACTICUM_TOKEN".into(), "TELEGRAM_CHAT_ID".into()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn malformed_display_includes_reason() {
        let err = BotError::MalformedResponse(Malformed::MissingField("homeworks"));
        assert_eq!(
            err.to_string(),
            "Malformed API response: missing field `homeworks`"
        );
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn reportable_errors_keep_their_kind() {
        let errors = [
            BotError::TransportFault("timeout".into()),
            BotError::ServerFault("UnknownError".into()),
            BotError::MalformedResponse(Malformed::NotAnObject),
            BotError::UnknownStatus("cancelled".into()),
        ];
        let kinds: Vec<ErrorKind> = errors.iter().map(BotError::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::TransportFault,
                ErrorKind::ServerFault,
                ErrorKind::MalformedResponse,
                ErrorKind::UnknownStatus,
            ]
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BotError>();
    }
}
