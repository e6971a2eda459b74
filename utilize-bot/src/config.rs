use std::env;

use anyhow::{Context as _, bail};

/// Runtime settings read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub error_webhook_url: Option<String>,
    pub crash_hidden: bool,
    pub crash_include_stack: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let error_webhook_url = lookup("ERROR_WEBHOOK_URL").filter(|url| !url.trim().is_empty());

        Ok(Self {
            token,
            error_webhook_url,
            crash_hidden: flag(&lookup, "CRASH_HIDDEN")?,
            crash_include_stack: flag(&lookup, "CRASH_INCLUDE_STACK")?,
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<bool> {
    let Some(raw) = lookup(key) else {
        return Ok(false);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => bail!("{key} must be a boolean, got `{other}`"),
    }
}
