//! The Slack channel notifications are posted to.

use std::fmt;

/// Channel names as are visible in the Slack UI, with or without the leading
/// hash. Incoming webhooks accept either form.
///
/// ```
/// let with =    ChannelName("#alerts".into());
/// let without = ChannelName("alerts".into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelName(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// let x = ChannelName("ops".into());
/// assert_eq!(format!("{}", x), "ops");
/// ```
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
