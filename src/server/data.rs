use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use sqlx::PgPool;
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::services::jokes::JokeClient;
use crate::services::messenger::SendApiClient;

/// Shared data available to all routes and handlers
pub struct AppData {
    pub pool: PgPool,
    pub settings: Settings,
    pub jokes: JokeClient,
    pub messenger: SendApiClient,
    /// Per-user locks serializing webhook events for the same PSID, so a
    /// rapid second message never reads state the first is still writing
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AppData {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        let jokes = JokeClient::new(&settings.joke_api_url);
        let messenger = SendApiClient::new(&settings.graph_api_url, &settings.page_access_token);

        Self {
            pool,
            settings,
            jokes,
            messenger,
            user_locks: DashMap::new(),
        }
    }

    /// Get (or create) the lock guarding a user's quota state
    pub fn user_lock(&self, psid: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(psid.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl fmt::Debug for AppData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppData")
            .field("user_locks_count", &self.user_locks.len())
            .finish_non_exhaustive()
    }
}
