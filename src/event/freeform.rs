use super::{Event, ReplyFormat};
use crate::{error::Failure, slack::payload::Color};

/// A plain message, typically from an uptime checker, e.g. "api is DOWN".
#[derive(Debug, PartialEq, Eq)]
pub struct Freeform(String);

impl Event for Freeform {
    const REPLY: ReplyFormat = ReplyFormat::Plaintext;

    fn parse(message: &str) -> Result<Self, Failure> {
        if message.is_empty() {
            return Err(Failure::BadRequest("empty message".into()));
        }

        Ok(Freeform(message.to_owned()))
    }

    fn text(&self) -> &str {
        &self.0
    }

    fn pretext(&self) -> String {
        String::new()
    }

    /// Case-sensitive. "UP" wins when both keywords are present.
    fn color(&self) -> Color {
        if self.0.contains("UP") {
            Color::Good
        } else if self.0.contains("DOWN") {
            Color::Danger
        } else {
            Color::Neutral
        }
    }
}
