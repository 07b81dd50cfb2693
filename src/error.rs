use crate::slack::SlackError;
use axum::http::StatusCode;
use std::fmt;

/// Sum type representing every way a single notification can fail.
#[derive(Debug)]
pub enum Failure {
    /// The inbound message was empty or couldn't be parsed.
    BadRequest(String),
    /// The payload couldn't be serialised.
    Encoding(serde_json::Error),
    /// The payload couldn't be delivered.
    Slack(SlackError),
}

impl Failure {
    /// Every failure surfaces as a 500, including those caused by the
    /// caller's input.
    pub fn status(&self) -> StatusCode {
        match self {
            Failure::BadRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Failure::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Failure::Slack(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SlackError> for Failure {
    fn from(e: SlackError) -> Self {
        Failure::Slack(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Failure::BadRequest(reason) => format!("bad request: {}", reason),
            Failure::Encoding(e) => format!("failed to encode payload: {}", e),
            Failure::Slack(e) => e.to_string(),
        };

        write!(f, "{}", x)
    }
}
