pub mod client;
pub mod error;

pub use client::{API_URL, Notifier, TelegramNotifier};
pub use error::NotifyError;
