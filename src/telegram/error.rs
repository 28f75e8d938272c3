//! Delivery errors for the Telegram Bot API.
//!
//! A [`NotifyError`] is never fatal: the poll loop logs it and moves on to the
//! next iteration without retrying.

use thiserror::Error;

/// Errors that can occur while sending a chat message.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The Bot API answered with a non-success HTTP status.
    #[error("Telegram API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The Bot API answered 200 but with `"ok": false`.
    #[error("Telegram rejected the message: {0}")]
    Rejected(String),

    /// Underlying network failure. The request URL carries the bot token, so it
    /// is stripped before the error is stored.
    #[error("network error: {0}")]
    NetworkError(reqwest::Error),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::NetworkError(err.without_url())
    }
}
