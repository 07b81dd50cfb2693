//! Incident lifecycle events from a monitoring integration, delivered as JSON
//! in the `message` query param.

use super::{Event, ReplyFormat};
use crate::{error::Failure, slack::payload::Color};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

/// The monitoring service's webhook shape. Absent or `null` fields take their
/// zero value; unknown fields are ignored.
///
/// ```json
/// {
///     "check": "api.example.com",
///     "incidentid": 1024,
///     "action": "notify_of_close",
///     "description": "api.example.com is back up"
/// }
/// ```
#[serde_as]
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CheckEvent {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub check: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, rename = "incidentid", alias = "incidentId", alias = "incident_id")]
    pub incident_id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub action: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,
}

impl CheckEvent {
    pub fn title(&self) -> String {
        match self.action.as_str() {
            "notify_of_close" => "Event Closed".into(),
            "assign" => "Event Assigned".into(),
            x => title_case(x),
        }
    }
}

impl Event for CheckEvent {
    const REPLY: ReplyFormat = ReplyFormat::Json;

    fn parse(message: &str) -> Result<Self, Failure> {
        serde_json::from_str(message)
            .map_err(|e| Failure::BadRequest(format!("invalid check event: {}", e)))
    }

    fn text(&self) -> &str {
        &self.description
    }

    fn pretext(&self) -> String {
        self.title()
    }

    /// Only closing an incident is good news.
    fn color(&self) -> Color {
        match self.action.as_str() {
            "notify_of_close" => Color::Good,
            _ => Color::Danger,
        }
    }
}

/// Capitalise the first letter of every word, leaving everything else as is.
///
/// ```
/// assert_eq!(title_case("page oncall"), "Page Oncall");
/// assert_eq!(title_case("notify_of_ack"), "Notify_of_ack");
/// ```
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if prev.map_or(true, is_word_separator) {
            push_titlecase(&mut out, c);
        } else {
            out.push(c);
        }

        prev = Some(c);
    }

    out
}

/// Titlecase rather than uppercase for the Latin digraphs, e.g. `ǆ` becomes
/// `ǅ` rather than `Ǆ`. Everything else is uppercased.
fn push_titlecase(out: &mut String, c: char) {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        _ => out.extend(c.to_uppercase()),
    }
}

/// Underscores join words, as do letters and digits in any script.
fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else if c.is_alphanumeric() {
        false
    } else {
        c.is_whitespace()
    }
}
