use std::fmt;

/// Sum type representing every way delivery to the webhook can fail.
#[derive(Debug)]
pub enum SlackError {
    /// The webhook couldn't be reached at all, e.g. connection refused or a
    /// DNS failure.
    RequestFailed(reqwest::Error),
    /// The webhook was reached but answered with something other than 200.
    BadResponse { status: u16, body: String },
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::RequestFailed(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            SlackError::RequestFailed(e) => format!("Slack webhook request failed: {}", e),
            SlackError::BadResponse { status, body } => {
                format!("bad response (status {}): {}", status, body)
            }
        };

        write!(f, "{}", x)
    }
}
