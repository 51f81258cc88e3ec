use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::Filter;

use crate::handlers::event_handler;
use crate::server::data::AppData;

/// Query parameters of the Messenger verification handshake
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Top-level webhook delivery body
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    pub sender: Sender,
    pub timestamp: Option<i64>,
    pub message: Option<IncomingMessage>,
    pub postback: Option<Postback>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    pub payload: Option<String>,
}

/// Serve the webhook until the process is killed
pub async fn run(settings: crate::config::Settings, pool: sqlx::PgPool) {
    let port = settings.port;
    let data = Arc::new(AppData::new(pool, settings));
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Webhook listening on {}", addr);
    warp::serve(routes(data)).run(addr).await;
}

pub fn routes(
    data: Arc<AppData>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let verify = warp::get()
        .and(warp::path("webhook"))
        .and(warp::path::end())
        .and(warp::query::<VerifyParams>())
        .and(with(data.clone()))
        .map(handle_verify);

    let receive = warp::post()
        .and(warp::path("webhook"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(data))
        .map(handle_delivery);

    verify.or(receive)
}

fn with<T>(data: T) -> impl Filter<Extract = (T,), Error = Infallible> + Clone
where
    T: Send + Sync + Clone,
{
    warp::any().map(move || data.clone())
}

fn handle_verify(params: VerifyParams, data: Arc<AppData>) -> impl warp::Reply {
    let verified = params.mode.as_deref() == Some("subscribe")
        && params.verify_token.as_deref() == Some(data.settings.verify_token.as_str());

    if verified {
        info!("Webhook verified");
        warp::reply::with_status(params.challenge.unwrap_or_default(), StatusCode::OK)
    } else {
        warn!("Webhook verification rejected");
        warp::reply::with_status(String::new(), StatusCode::FORBIDDEN)
    }
}

/// Acknowledge the delivery immediately and process events off the request
/// path. The platform retries deliveries that do not get a 200, so internal
/// failures must never bleed into the response.
fn handle_delivery(payload: WebhookPayload, data: Arc<AppData>) -> impl warp::Reply {
    if payload.object != "page" {
        return warp::reply::with_status("", StatusCode::NOT_FOUND);
    }

    for entry in payload.entry {
        // entry.messaging is an array but only ever carries one event
        if let Some(event) = entry.messaging.into_iter().next() {
            let data = data.clone();
            tokio::spawn(async move {
                let psid = event.sender.id.clone();
                if let Err(e) = event_handler::process_event(&data, event).await {
                    error!("Failed to process event from {}: {}", psid, e);
                }
            });
        }
    }

    warp::reply::with_status("EVENT_RECEIVED", StatusCode::OK)
}
