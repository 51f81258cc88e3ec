use serde_json::json;
use tracing::info;

use crate::constants::quota::REQUEST_TIMEOUT;
use crate::server::error::Error;

/// Client for the Messenger Send API
#[derive(Debug, Clone)]
pub struct SendApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SendApiClient {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    /// Send a text message to a user by PSID
    pub async fn send_text(&self, psid: &str, text: &str) -> Result<(), Error> {
        let url = format!("{}/v2.6/me/messages", self.base_url);
        let body = json!({
            "recipient": { "id": psid },
            "message": { "text": text },
        });

        let response = self
            .http
            .post(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Send(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Send(format!(
                "Send API returned {}",
                response.status()
            )));
        }

        info!("Message sent to {}", psid);
        Ok(())
    }
}
