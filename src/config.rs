//! Process-wide configuration, read once from the environment at startup.
//!
//! Required:
//!
//! - `$SLACK_DOMAIN`, e.g. `acme.slack.com`
//! - `$SLACK_TOKEN`, the incoming webhook's token
//! - `$SLACK_CHANNEL`, where every notification is posted
//!
//! Optional:
//!
//! - `$PORT`, defaulting to 8080
//! - `$NOTIFY_MODE`, either `freeform` (the default) or `structured`

use crate::{
    event::Mode,
    slack::{webhook::webhook_url, ChannelName},
};
use std::{env, fmt};
use url::Url;

const DEFAULT_PORT: u16 = 8080;

pub struct Config {
    pub webhook_url: Url,
    pub channel: ChannelName,
    pub mode: Mode,
    pub port: u16,
}

/// Anything wrong with the environment which should stop us from starting.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidPort(String),
    InvalidMode(String),
    InvalidDomain(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ConfigError::Missing(k) => format!("please specify a {} environment variable", k),
            ConfigError::InvalidPort(x) => format!("could not parse PORT to u16: {}", x),
            ConfigError::InvalidMode(x) => {
                format!("NOTIFY_MODE must be freeform or structured, found: {}", x)
            }
            ConfigError::InvalidDomain(x) => format!("invalid SLACK_DOMAIN: {}", x),
        };

        write!(f, "{}", x)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Build from any key-value source. Empty values count as missing.
    fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| get(k).filter(|v| !v.is_empty());
        let require = |k: &'static str| get(k).ok_or(ConfigError::Missing(k));

        let domain = require("SLACK_DOMAIN")?;
        let token = require("SLACK_TOKEN")?;
        let channel = ChannelName(require("SLACK_CHANNEL")?);

        let webhook_url =
            webhook_url(&domain, &token).map_err(|_| ConfigError::InvalidDomain(domain))?;

        let port = match get("PORT") {
            Some(x) => x.parse().map_err(|_| ConfigError::InvalidPort(x))?,
            None => DEFAULT_PORT,
        };

        let mode = match get("NOTIFY_MODE") {
            Some(x) => x.parse().map_err(ConfigError::InvalidMode)?,
            None => Mode::default(),
        };

        Ok(Config {
            webhook_url,
            channel,
            mode,
            port,
        })
    }
}
