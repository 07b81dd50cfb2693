//! Server router definition.
//!
//! The following route is supported:
//!
//! - GET: `/notify?message=...`

use crate::{
    config::Config,
    error::Failure,
    event::{CheckEvent, Event, Freeform, Mode, ReplyFormat},
    slack::{payload, webhook::WebhookClient, ChannelName},
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tower_http::trace::{self, TraceLayer};
use tracing::{error, info, Level};

/// Dependencies shared by routes across requests. Read-only once built.
#[derive(Clone)]
pub struct Deps {
    pub webhook: WebhookClient,
    pub channel: ChannelName,
}

impl Deps {
    pub fn new(config: &Config) -> Self {
        Deps {
            webhook: WebhookClient::new(config.webhook_url.clone()),
            channel: config.channel.clone(),
        }
    }
}

/// Instantiate a new router with tracing, accepting events as per `mode`.
pub fn new(deps: Deps, mode: Mode) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    let handler = match mode {
        Mode::Freeform => get(notify_handler::<Freeform>),
        Mode::Structured => get(notify_handler::<CheckEvent>),
    };

    Router::new()
        .route("/notify", handler)
        .layer(trace_layer)
        .with_state(deps)
}

/// Handler for the GET route `/notify`.
///
/// Parses the `message` query param as an [Event] and posts it to Slack,
/// replying with 200 on success and 500 on any failure.
async fn notify_handler<E: Event>(
    State(deps): State<Deps>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let message = first_message(params);
    info!("Received message: '{}'", message);

    let res = notify::<E>(&deps, &message).await;

    match &res {
        Ok(_) => info!("Successfully notified Slack: '{}'", message),
        Err(e) => error!("Failed to notify Slack: {}", e),
    }

    reply(E::REPLY, res)
}

/// The first `message` query param. Absent is treated as empty, and repeats
/// are ignored, rather than either being rejected.
fn first_message(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(k, _)| k == "message")
        .map(|(_, v)| v)
        .unwrap_or_default()
}

/// Parse, encode, and deliver a single message.
async fn notify<E: Event>(deps: &Deps, message: &str) -> Result<(), Failure> {
    let event = E::parse(message)?;
    info!("Parsed event: {:?}", event);

    let form = payload::encode(&deps.channel, &event.attachment()).map_err(Failure::Encoding)?;

    deps.webhook.post_form(&form).await?;

    Ok(())
}

/// Render the outcome in the deployment's reply format.
fn reply(format: ReplyFormat, res: Result<(), Failure>) -> Response {
    let (status, body) = match (format, &res) {
        (ReplyFormat::Plaintext, Ok(_)) => (StatusCode::OK, "success".to_owned()),
        (ReplyFormat::Plaintext, Err(e)) => (e.status(), e.to_string()),
        (ReplyFormat::Json, Ok(_)) => (
            StatusCode::OK,
            json!({ "status": "notified" }).to_string(),
        ),
        (ReplyFormat::Json, Err(e)) => (
            e.status(),
            json!({ "error": e.to_string() }).to_string(),
        ),
    };

    let content_type = match format {
        ReplyFormat::Plaintext => "text/plain; charset=utf-8",
        ReplyFormat::Json => "application/json",
    };

    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
        ],
        body,
    )
        .into_response()
}
