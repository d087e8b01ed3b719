use std::fmt;

use serde_json::Value;

/// Terminal outcome taxonomy for a generation submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyPrompt,
    InvalidRequest,
    Unauthorized,
    Overloaded,
    NetworkError,
    Cancelled,
    Unknown,
}

impl ErrorKind {
    pub fn default_message(&self) -> &'static str {
        match *self {
            Self::EmptyPrompt => "Please enter a prompt.",
            Self::InvalidRequest => "Invalid request.",
            Self::Unauthorized => "Authentication failed. Please login again.",
            Self::Overloaded => "Model overloaded! Please try again in a moment.",
            Self::NetworkError => {
                "Network error. Please check your connection and that the backend server is running."
            }
            Self::Cancelled => "Generation cancelled.",
            Self::Unknown => "Generation failed.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: ErrorKind,
    pub message: String,
}

impl GenerateError {
    pub fn new(kind: ErrorKind) -> Self {
        return Self {
            kind,
            message: kind.default_message().to_string(),
        };
    }

    pub fn with_message(kind: ErrorKind, message: String) -> Self {
        return Self { kind, message };
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenerateError {}

/// Pulls a human-readable message out of an error body. Shapes seen on the
/// wire, in priority order: a plain string under "error", an object with a
/// "message" field, an object with an "issues" array of { message } entries
/// (validation-framework shape), then a top-level "message".
pub fn extract_error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::String(message)) => return Some(message.to_string()),
        Some(Value::Object(error)) => {
            if let Some(Value::String(message)) = error.get("message") {
                return Some(message.to_string());
            }

            if let Some(Value::Array(issues)) = error.get("issues") {
                let messages: Vec<&str> = issues
                    .iter()
                    .filter_map(|issue| issue.get("message"))
                    .filter_map(|message| message.as_str())
                    .collect();

                if !messages.is_empty() {
                    return Some(messages.join(", "));
                }
            }
        }
        _ => {}
    }

    match body.get("message") {
        Some(Value::String(message)) => Some(message.to_string()),
        _ => None,
    }
}
