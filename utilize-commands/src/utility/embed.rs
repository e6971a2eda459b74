use std::sync::OnceLock;

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use utilize_core::Context;
use utilize_utils::{
    color::HttpImageFetcher,
    embed::{BotIdentity, EmbedLocale, EmbedStyle, build_embed},
};

pub const META: CommandMeta = CommandMeta {
    name: "embed",
    desc: "Shows a styled, localized embed.",
    category: "utility",
    usage: "!embed [success|error|default] [tr|en]",
};

fn image_fetcher() -> anyhow::Result<&'static HttpImageFetcher> {
    static FETCHER: OnceLock<HttpImageFetcher> = OnceLock::new();

    if let Some(fetcher) = FETCHER.get() {
        return Ok(fetcher);
    }
    let fetcher = HttpImageFetcher::new()?;
    Ok(FETCHER.get_or_init(|| fetcher))
}

/// Parse `[style] [locale]`, defaulting each when absent.
pub fn parse_args(args: &[&str]) -> Result<(EmbedStyle, EmbedLocale), String> {
    let style = match args.first() {
        Some(raw) => raw.parse::<EmbedStyle>().map_err(|error| error.to_string())?,
        None => EmbedStyle::default(),
    };
    let locale = match args.get(1) {
        Some(raw) => raw.parse::<EmbedLocale>().map_err(|error| error.to_string())?,
        None => EmbedLocale::default(),
    };

    Ok((style, locale))
}

/// Send an embed built for the requested style and locale.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, args: &[&str]) -> anyhow::Result<()> {
    let http = &ctx.http;

    let (style, locale) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(reason) => {
            let out = format!("{reason}\nUsage: `{}`", META.usage);
            http.create_message(msg.channel_id).content(&out).await?;
            return Ok(());
        }
    };

    let current_user = http.current_user().await?.model().await?;
    let identity = BotIdentity::from_current_user(&current_user);

    let embed = build_embed(Some(&identity), style, locale, image_fetcher()?)
        .await?
        .description(format!("style `{style}` · locale `{locale}`"))
        .validate()?
        .build();

    http.create_message(msg.channel_id)
        .embeds(&[embed])
        .await?;

    Ok(())
}
