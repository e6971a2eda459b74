use tracing::debug;
use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

use crate::CommandMeta;
use crate::utility::usage_message;
use utilize_core::Context;
use utilize_utils::{array::chunk, embed::SUCCESS_COLOR, pagination::send_paginated_default};

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Browse a sample list with pager buttons.",
    category: "utility",
    usage: "!pages [items per page]",
};

const SAMPLE_ITEMS: usize = 23;
const DEFAULT_PER_PAGE: usize = 5;

/// Post a paginated sample list owned by the caller.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;

    let per_page = match arg1 {
        Some(raw) => raw.parse::<usize>().ok(),
        None => Some(DEFAULT_PER_PAGE),
    };
    let Some(pages) = per_page.and_then(|size| sample_pages(size).ok()) else {
        http.create_message(msg.channel_id)
            .content(&usage_message(&META))
            .await?;
        return Ok(());
    };

    let running = send_paginated_default(&ctx, msg.channel_id, pages, Some(msg.author.id)).await?;
    debug!(pages = running.page_count(), "sample pager started");

    Ok(())
}

fn sample_items() -> Vec<String> {
    (1..=SAMPLE_ITEMS).map(|n| format!("Item {n}")).collect()
}

/// Split the sample items into numbered embed pages.
pub fn sample_pages(per_page: usize) -> anyhow::Result<Vec<Embed>> {
    let items = sample_items();
    let chunks = chunk(&items, per_page)?;
    let total = chunks.len();

    chunks
        .iter()
        .enumerate()
        .map(|(index, page_items)| {
            let offset = index * per_page;
            let description = page_items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("`{}.` {item}", offset + i + 1))
                .collect::<Vec<_>>()
                .join("\n");

            let footer = EmbedFooterBuilder::new(format!("Page {}/{total}", index + 1)).build();
            Ok(EmbedBuilder::new()
                .title("Sample Items")
                .color(SUCCESS_COLOR)
                .description(description)
                .footer(footer)
                .validate()?
                .build())
        })
        .collect()
}
