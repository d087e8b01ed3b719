//! Client-side SDK for the generations endpoint: an HTTP transport seam,
//! a submission coordinator with overload retries and cancellation, and
//! progress notifications for toast-style UI feedback.

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod models;
pub mod progress;
pub mod transport;
