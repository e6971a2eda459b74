//! Webhook delivery for forwarded errors.

use std::{borrow::Cow, sync::Arc};

use async_trait::async_trait;
use reqwest::Url;
use twilight_http::Client;
use twilight_model::id::{Id, marker::WebhookMarker};

use utilize_core::{UtilizeError, UtilizeResult};

/// Discord's message content limit, in characters.
pub const MESSAGE_CONTENT_LIMIT: usize = 2000;

const ELLIPSIS: &str = "...";

/// Destination for forwarded error text.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn send(&self, content: &str) -> anyhow::Result<()>;
}

/// How a webhook is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookConfig {
    Credentials { id: Id<WebhookMarker>, token: String },
    Url(String),
}

impl WebhookConfig {
    /// Resolve to the webhook's id and token.
    pub fn into_credentials(self) -> UtilizeResult<(Id<WebhookMarker>, String)> {
        match self {
            Self::Credentials { id, token } if !token.is_empty() => Ok((id, token)),
            Self::Credentials { .. } => Err(UtilizeError::invalid("webhook token is empty")),
            Self::Url(url) => parse_webhook_url(&url),
        }
    }
}

/// Parse `https://discord.com/api/webhooks/{id}/{token}`.
///
/// Versioned API paths and the `discordapp.com`, `canary.` and `ptb.` hosts are accepted.
pub fn parse_webhook_url(url: &str) -> UtilizeResult<(Id<WebhookMarker>, String)> {
    let parsed = Url::parse(url)
        .map_err(|source| UtilizeError::invalid(format!("invalid webhook url: {source}")))?;

    let host = parsed.host_str().unwrap_or_default();
    let discord_host = ["discord.com", "discordapp.com"]
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")));
    if !discord_host {
        return Err(UtilizeError::invalid(format!(
            "webhook url must point at discord.com, got `{host}`"
        )));
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    let Some(position) = segments.iter().position(|segment| *segment == "webhooks") else {
        return Err(UtilizeError::invalid("webhook url has no /webhooks/ path"));
    };

    let (Some(id), Some(token)) = (segments.get(position + 1), segments.get(position + 2)) else {
        return Err(UtilizeError::invalid(
            "webhook url must end with /webhooks/{id}/{token}",
        ));
    };

    let id = id
        .parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| UtilizeError::invalid(format!("invalid webhook id `{id}`")))?;

    Ok((id, (*token).to_owned()))
}

/// Shorten `content` to fit in one Discord message.
pub fn truncate_content(content: &str) -> Cow<'_, str> {
    if content.chars().count() <= MESSAGE_CONTENT_LIMIT {
        return Cow::Borrowed(content);
    }

    let keep = MESSAGE_CONTENT_LIMIT - ELLIPSIS.len();
    let mut truncated: String = content.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// [`WebhookSink`] that executes a Discord webhook through twilight.
pub struct TwilightWebhook {
    http: Arc<Client>,
    id: Id<WebhookMarker>,
    token: String,
}

impl TwilightWebhook {
    pub fn new(http: Arc<Client>, config: WebhookConfig) -> UtilizeResult<Self> {
        let (id, token) = config.into_credentials()?;
        Ok(Self { http, id, token })
    }

    pub fn id(&self) -> Id<WebhookMarker> {
        self.id
    }
}

#[async_trait]
impl WebhookSink for TwilightWebhook {
    async fn send(&self, content: &str) -> anyhow::Result<()> {
        let content = truncate_content(content);
        self.http
            .execute_webhook(self.id, &self.token)
            .content(&content)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_and_versioned_urls() {
        let (id, token) = parse_webhook_url("https://discord.com/api/webhooks/123/abc-DEF").unwrap();
        assert_eq!(id.get(), 123);
        assert_eq!(token, "abc-DEF");

        let (id, token) =
            parse_webhook_url("https://canary.discordapp.com/api/v10/webhooks/9/tok/").unwrap();
        assert_eq!(id.get(), 9);
        assert_eq!(token, "tok");
    }

    #[test]
    fn rejects_malformed_urls() {
        for url in [
            "not a url",
            "https://example.com/api/webhooks/1/token",
            "https://discord.com/api/channels/1",
            "https://discord.com/api/webhooks/1",
            "https://discord.com/api/webhooks/0/token",
            "https://discord.com/api/webhooks/abc/token",
        ] {
            assert!(
                matches!(parse_webhook_url(url), Err(UtilizeError::InvalidArgument(_))),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn credentials_need_a_token() {
        let config = WebhookConfig::Credentials {
            id: Id::new(5),
            token: String::new(),
        };
        assert!(config.into_credentials().is_err());
    }

    #[test]
    fn long_content_is_truncated_to_the_limit() {
        assert!(matches!(truncate_content("short"), Cow::Borrowed("short")));

        let long = "é".repeat(MESSAGE_CONTENT_LIMIT + 10);
        let truncated = truncate_content(&long);
        assert_eq!(truncated.chars().count(), MESSAGE_CONTENT_LIMIT);
        assert!(truncated.ends_with(ELLIPSIS));
    }
}
