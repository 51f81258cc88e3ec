use std::time::Duration;

/// Jokes a user may hear before the cooldown engages. The count is checked
/// after delivery, so the transition fires on the evaluation where count > 10.
pub const MAX_JOKES_PER_CYCLE: i32 = 10;

/// How long a user stays blocked once the quota is exhausted
pub const COOLDOWN_HOURS: i64 = 24;

/// Timeout applied to every outbound HTTP call (joke fetch, Send API)
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default webhook listen port
pub const DEFAULT_PORT: u16 = 1337;

/// Record status while a cooldown timer is running
pub const STATUS_COOLDOWN: i32 = -1;
