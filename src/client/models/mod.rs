pub mod generation_request;
pub mod session;
