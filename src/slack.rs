//! Post colour-coded notifications to a Slack channel through an incoming
//! webhook.
//!
//! See [payload::encode] and [webhook::WebhookClient].

pub mod channel;
pub mod error;
pub mod payload;
pub mod webhook;

pub use channel::ChannelName;
pub use error::SlackError;
