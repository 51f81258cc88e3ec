use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::constants::replies;
use crate::db::queries::records;
use crate::server::data::AppData;
use crate::server::error::Error;
use crate::server::routes::{IncomingMessage, MessagingEvent};
use crate::services::quota::state_machine::{self, MutationIntent};
use crate::services::routing::classifier;
use crate::services::routing::router::{self, ReplyPolicy, StoreMutation};

/// Process one webhook messaging event. The webhook has already been
/// acknowledged by the time this runs; errors here are for the logs only.
pub async fn process_event(data: &Arc<AppData>, event: MessagingEvent) -> Result<(), Error> {
    let psid = event.sender.id;
    debug!("Event from {} at {:?}", psid, event.timestamp);

    if let Some(message) = event.message {
        handle_message(data, &psid, message).await
    } else if let Some(payload) = event.postback.and_then(|p| p.payload) {
        // postbacks carry their payload where a message carries text
        handle_text(data, &psid, &payload).await
    } else {
        Ok(())
    }
}

async fn handle_message(
    data: &Arc<AppData>,
    psid: &str,
    message: IncomingMessage,
) -> Result<(), Error> {
    match message.text {
        Some(text) => handle_text(data, psid, &text).await,
        None if !message.attachments.is_empty() => {
            data.messenger.send_text(psid, replies::ATTACHMENT_ACK).await
        }
        None => {
            debug!("Event from {} carried neither text nor attachments", psid);
            Ok(())
        }
    }
}

/// The decision flow for one text message: classify, derive quota state,
/// apply any required record mutation, then reply. Everything runs under the
/// sender's lock so a rapid second message sees the persisted state.
async fn handle_text(data: &Arc<AppData>, psid: &str, text: &str) -> Result<(), Error> {
    let intent = classifier::classify(text);
    debug!("Classified message from {} as {:?}", psid, intent);

    let lock = data.user_lock(psid);
    let _guard = lock.lock().await;

    let now = Utc::now();
    let record = records::get(&data.pool, psid).await?;
    let (state, pre_mutation) = state_machine::evaluate(record.as_ref(), now);

    match pre_mutation {
        Some(MutationIntent::ClearCooldown) => {
            info!("Cooldown expired for {}, clearing", psid);
            records::clear_cooldown(&data.pool, psid).await?;
        }
        Some(MutationIntent::ApplyCooldown) => {
            info!("Quota exhausted for {}, starting cooldown", psid);
            records::apply_cooldown(&data.pool, psid, now).await?;
        }
        None => {}
    }

    let (reply, mutation) = router::route(intent, state);

    let reply_text = match reply {
        ReplyPolicy::Joke => match data.jokes.fetch_random().await {
            Ok(joke) => Some(joke),
            Err(e) => {
                // No joke delivered, so the quota is not consumed either
                warn!("Suppressing reply to {}: {}", psid, e);
                return Ok(());
            }
        },
        ReplyPolicy::Help => Some(replies::HELP_MESSAGE.to_string()),
        ReplyPolicy::Hint => Some(replies::HINT_MESSAGE.to_string()),
        ReplyPolicy::Silent => None,
    };

    if let Some(mutation) = mutation {
        match mutation {
            StoreMutation::InsertNew => records::insert(&data.pool, psid, now).await?,
            StoreMutation::IncrementCount => records::increment_count(&data.pool, psid).await?,
            StoreMutation::Reset => records::reset(&data.pool, psid).await?,
        }
    }

    if let Some(text) = reply_text {
        data.messenger.send_text(psid, &text).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::server::routes::Sender;

    fn test_data() -> Arc<AppData> {
        let settings = Settings {
            page_access_token: "page-token".to_string(),
            verify_token: "secret".to_string(),
            database_url: "postgres://localhost/unused".to_string(),
            port: 0,
            joke_api_url: "http://127.0.0.1:1".to_string(),
            graph_api_url: "http://127.0.0.1:1".to_string(),
        };
        let pool = sqlx::PgPool::connect_lazy(&settings.database_url).expect("lazy pool");
        Arc::new(AppData::new(pool, settings))
    }

    #[tokio::test]
    async fn empty_event_is_a_noop() {
        let data = test_data();
        let event = MessagingEvent {
            sender: Sender { id: "42".to_string() },
            timestamp: Some(1_700_000_000_000),
            message: None,
            postback: None,
        };
        // Touches neither the store nor the network
        process_event(&data, event).await.expect("noop");
    }

    #[tokio::test]
    async fn attachment_only_message_sends_ack() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/v2.6/me/messages"))
            .and(wiremock::matchers::body_json(serde_json::json!({
                "recipient": { "id": "42" },
                "message": { "text": crate::constants::replies::ATTACHMENT_ACK },
            })))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let settings = Settings {
            page_access_token: "page-token".to_string(),
            verify_token: "secret".to_string(),
            database_url: "postgres://localhost/unused".to_string(),
            port: 0,
            joke_api_url: "http://127.0.0.1:1".to_string(),
            graph_api_url: server.uri(),
        };
        let pool = sqlx::PgPool::connect_lazy(&settings.database_url).expect("lazy pool");
        let data = Arc::new(AppData::new(pool, settings));

        let event = MessagingEvent {
            sender: Sender { id: "42".to_string() },
            timestamp: None,
            message: Some(IncomingMessage {
                text: None,
                attachments: vec![serde_json::json!({ "type": "image" })],
            }),
            postback: None,
        };
        process_event(&data, event).await.expect("ack sent");
    }
}
