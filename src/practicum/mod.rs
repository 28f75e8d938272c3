pub mod client;
pub mod types;

pub use client::{ENDPOINT, PracticumClient, StatusSource};
pub use types::{ApiResponse, SubmissionRecord};
