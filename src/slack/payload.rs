//! The legacy incoming webhook message format: a channel plus a single
//! colour-coded attachment, JSON-encoded into a `payload` form field.
//!
//! <https://api.slack.com/reference/messaging/attachments>

use super::channel::ChannelName;
use serde::Serialize;

/// The sidebar colour of an attachment, signalling severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "danger")]
    Danger,
    /// Neutral grey, for anything we can't classify.
    #[serde(rename = "#cfcfcf")]
    Neutral,
}

/// A single richly-formatted block beneath a message.
///
/// `fallback` and `text` always carry the same content; the former is what
/// clients that can't render attachments (and notifications) show.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub text: String,
    pub pretext: String,
    pub color: Color,
}

impl Attachment {
    pub fn new(text: String, pretext: String, color: Color) -> Self {
        Attachment {
            fallback: text.clone(),
            text,
            pretext,
            color,
        }
    }
}

/// <https://api.slack.com/messaging/webhooks#advanced_message_formatting>
#[derive(Serialize)]
struct Payload<'a> {
    #[serde(skip_serializing_if = "is_empty")]
    channel: &'a str,
    // We never send top-level text, everything lives in the attachment.
    #[serde(skip_serializing_if = "is_empty")]
    text: &'a str,
    attachments: [&'a Attachment; 1],
}

fn is_empty(x: &&str) -> bool {
    x.is_empty()
}

/// The form body accepted by the webhook. Serialised by
/// `serde_urlencoded` as `payload=<json>`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WebhookForm {
    pub payload: String,
}

/// Build the form body for posting `attachment` to `channel`.
pub fn encode(
    channel: &ChannelName,
    attachment: &Attachment,
) -> Result<WebhookForm, serde_json::Error> {
    let payload = Payload {
        channel: &channel.0,
        text: "",
        attachments: [attachment],
    };

    serde_json::to_string(&payload).map(|payload| WebhookForm { payload })
}
