use serde::Deserialize;

use crate::constants::quota::REQUEST_TIMEOUT;
use crate::server::error::Error;

#[derive(Debug, Deserialize)]
struct JokeResponse {
    value: JokeValue,
}

#[derive(Debug, Deserialize)]
struct JokeValue {
    joke: String,
}

/// Client for the ICNDb random joke endpoint
#[derive(Debug, Clone)]
pub struct JokeClient {
    http: reqwest::Client,
    base_url: String,
}

impl JokeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one random joke. Transport errors, timeouts, non-2xx responses
    /// and malformed bodies all come back as `Error::Fetch`.
    pub async fn fetch_random(&self) -> Result<String, Error> {
        let url = format!("{}/jokes/random/", self.base_url);

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "joke API returned {}",
                response.status()
            )));
        }

        let body: JokeResponse = response
            .json()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        Ok(body.value.joke)
    }
}
