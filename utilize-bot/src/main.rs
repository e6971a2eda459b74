mod config;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use utilize_commands::{handle_interaction, handle_message};
use utilize_core::Context;
use utilize_utils::crash::{
    ErrorForwarder, ErrorReporter, ForwarderOptions, TwilightWebhook, WebhookConfig,
    WebhookSink,
};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));
    let ctx = Context::new(Arc::clone(&http));

    // Panics and failed handler tasks go to one reporter, gateway errors to another
    let (reporter, process_events) = ErrorReporter::channel();
    let (client_reporter, client_events) = ErrorReporter::channel();

    let sink = match config.error_webhook_url.clone() {
        Some(url) => match TwilightWebhook::new(Arc::clone(&http), WebhookConfig::Url(url)) {
            Ok(webhook) => Some(Arc::new(webhook) as Arc<dyn WebhookSink>),
            Err(source) => {
                warn!(%source, "ignoring invalid ERROR_WEBHOOK_URL");
                None
            }
        },
        None => None,
    };

    let forwarder = ErrorForwarder::new(ForwarderOptions {
        hidden: config.crash_hidden,
        include_stack: config.crash_include_stack,
        sink,
    });
    forwarder.install_panic_hook(reporter.clone());
    forwarder
        .with_process_events(process_events)
        .with_client_events(client_events)
        .init()?;

    // Declare which intents the bot has
    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), config.token, intents);

    info!("utilize is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                client_reporter.client_error(&source);
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.name, "utilize is ready");
            }
            Event::MessageCreate(msg) => {
                reporter.spawn(handle_message(ctx.clone(), msg));
            }
            Event::InteractionCreate(interaction) => {
                reporter.spawn(handle_interaction(ctx.clone(), interaction));
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
