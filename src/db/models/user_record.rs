use chrono::{DateTime, Utc};

use crate::constants::quota::STATUS_COOLDOWN;

/// One row per Messenger user (PSID), tracking joke quota and cooldown.
/// Created on the first joke request, mutated forever after, never deleted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub status: i32,
    pub starttime: DateTime<Utc>,
    pub count: i32,
    pub heard_a_joke: bool,
}

impl UserRecord {
    pub fn in_cooldown(&self) -> bool {
        self.status == STATUS_COOLDOWN
    }
}
