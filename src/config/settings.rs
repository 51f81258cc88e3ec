use std::env;

use crate::constants::quota::DEFAULT_PORT;

const DEFAULT_JOKE_API_URL: &str = "https://api.icndb.com";
const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com";

#[derive(Debug, Clone)]
pub struct Settings {
    pub page_access_token: String,
    /// Webhook verification token. Falls back to the page access token when
    /// VERIFY_TOKEN is unset, matching the original deployment.
    pub verify_token: String,
    pub database_url: String,
    pub port: u16,
    pub joke_api_url: String,
    pub graph_api_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let page_access_token = env::var("PAGE_ACCESS_TOKEN")
            .map_err(|_| "PAGE_ACCESS_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set")?;

        let verify_token = env::var("VERIFY_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| page_access_token.clone());

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let joke_api_url = env::var("JOKE_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_JOKE_API_URL.to_string());

        let graph_api_url = env::var("GRAPH_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_GRAPH_API_URL.to_string());

        Ok(Self {
            page_access_token,
            verify_token,
            database_url,
            port,
            joke_api_url,
            graph_api_url,
        })
    }
}
