/// Overload (503) is the only retryable failure; everything else fails fast.
pub const MAX_RETRIES: u32 = 3;

/// First backoff delay; doubles per retry.
pub const BACKOFF_BASE_MS: u64 = 1000;

/// Ceiling on any single backoff delay.
pub const BACKOFF_MAX_MS: u64 = 10_000;

/// Restored sessions older than this are discarded.
pub const SESSION_TTL_SECS: u64 = 60 * 60 * 24 * 5;
