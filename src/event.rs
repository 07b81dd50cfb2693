//! Inbound events, parsed from the `message` query param and mapped onto a
//! Slack [Attachment].
//!
//! A deployment runs exactly one [Mode]:
//!
//! - [Freeform]: the message is the notification text, and its severity is
//!   guessed from keywords.
//! - [CheckEvent]: the message is a JSON incident lifecycle event from a
//!   monitoring integration.

use crate::{
    error::Failure,
    slack::payload::{Attachment, Color},
};
use std::{fmt, str::FromStr};

mod check;
mod freeform;

pub use check::CheckEvent;
pub use freeform::Freeform;

/// How a deployment replies to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Plaintext,
    Json,
}

/// Anything which can be parsed from a raw message and turned into a
/// notification.
pub trait Event: fmt::Debug + Sized + Send + 'static {
    const REPLY: ReplyFormat;

    fn parse(message: &str) -> Result<Self, Failure>;

    /// The body of the notification, also used as its fallback.
    fn text(&self) -> &str;

    /// An optional header line; empty for none.
    fn pretext(&self) -> String;

    fn color(&self) -> Color;

    fn attachment(&self) -> Attachment {
        Attachment::new(self.text().to_owned(), self.pretext(), self.color())
    }
}

/// Which [Event] a deployment accepts. Set by `$NOTIFY_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Freeform,
    Structured,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freeform" => Ok(Mode::Freeform),
            "structured" => Ok(Mode::Structured),
            x => Err(x.to_owned()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Freeform => write!(f, "freeform"),
            Mode::Structured => write!(f, "structured"),
        }
    }
}
