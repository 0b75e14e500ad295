//! s3-browser server library
//!
//! This module exports the server components for use in integration tests.

pub mod api;
pub mod args;
pub mod error;
pub mod state;

pub use api::router;
pub use error::ApiError;
pub use state::AppState;
