//! HTTP client module for the meetings backend

pub mod client;
pub mod meetings;

pub use client::{ApiError, BackendClient};
pub use meetings::{ConfirmationOutcome, MeetingsApi};
