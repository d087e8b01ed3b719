pub mod backend;
pub mod controller;
pub mod dtos;
pub mod enums;
pub mod errors;
pub mod models;
pub mod service;
pub mod structs;

/// GET /generations returns the caller's most recent history only.
pub static GENERATION_HISTORY_LIMIT: i64 = 5;
