//! Twilight glue for pagers over embed pages.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::{
    channel::message::{MessageFlags, component::Component, embed::Embed},
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use utilize_core::Context;

use super::{
    DEFAULT_TIMEOUT_SECS,
    collector::ComponentCollector,
    components::build_nav_components,
    paginator::{PageRenderer, Paginator, RunningPaginator},
    state::{ButtonRow, PagerState},
};

/// Ephemeral reply to clicks from someone other than the pager owner.
pub const PAGINATION_WRONG_USER_MESSAGE: &str = "Only the person who opened these pages can turn them.";

async fn create_response(
    http: &Client,
    interaction: &InteractionCreate,
    kind: InteractionResponseType,
    data: InteractionResponseData,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind,
        data: Some(data),
    };
    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Replace the clicked message's page and pager row in place.
pub async fn respond_update_message(
    http: &Client,
    interaction: &InteractionCreate,
    page: &Embed,
    components: Vec<Component>,
) -> anyhow::Result<()> {
    let data = InteractionResponseDataBuilder::new()
        .embeds([page.clone()])
        .components(components)
        .build();

    create_response(http, interaction, InteractionResponseType::UpdateMessage, data).await
}

/// Answer a click with a message only the clicker can see.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let data = InteractionResponseDataBuilder::new()
        .content(content)
        .flags(MessageFlags::EPHEMERAL)
        .build();

    create_response(
        http,
        interaction,
        InteractionResponseType::ChannelMessageWithSource,
        data,
    )
    .await
}

pub async fn respond_wrong_user(http: &Client, interaction: &InteractionCreate) -> anyhow::Result<()> {
    respond_ephemeral_message(http, interaction, PAGINATION_WRONG_USER_MESSAGE).await
}

/// Renders embed pages onto the message the pager buttons live on.
pub struct EmbedPageRenderer {
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
}

impl EmbedPageRenderer {
    pub fn new(
        http: Arc<Client>,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }
}

#[async_trait]
impl PageRenderer<Embed, Box<InteractionCreate>> for EmbedPageRenderer {
    async fn render(
        &self,
        event: &Box<InteractionCreate>,
        page: &Embed,
        row: &ButtonRow,
    ) -> anyhow::Result<()> {
        respond_update_message(&self.http, event, page, build_nav_components(row)).await
    }

    async fn reject(&self, event: &Box<InteractionCreate>) -> anyhow::Result<()> {
        respond_wrong_user(&self.http, event).await
    }

    async fn finish(&self, _page: &Embed, row: &ButtonRow) -> anyhow::Result<()> {
        let components = build_nav_components(row);
        self.http
            .update_message(self.channel_id, self.message_id)
            .components(Some(&components))
            .await?;

        Ok(())
    }
}

/// Post the first page with pager controls and start a pager on the new message.
///
/// The pager stops after `timeout_secs` without clicks and disables its row.
pub async fn send_paginated(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    pages: Vec<Embed>,
    owner: Option<Id<UserMarker>>,
    timeout_secs: u64,
) -> anyhow::Result<RunningPaginator<Embed>> {
    let state = PagerState::new(pages)?;
    let components = build_nav_components(&state.buttons());

    let created_message = ctx
        .http
        .create_message(channel_id)
        .embeds(std::slice::from_ref(state.current_page()))
        .components(&components)
        .await?
        .model()
        .await?;

    let collector = ComponentCollector::subscribe(
        &ctx.components,
        created_message.id,
        Duration::from_secs(timeout_secs),
    )
    .await;

    let renderer = EmbedPageRenderer::new(
        Arc::clone(&ctx.http),
        created_message.channel_id,
        created_message.id,
    );

    let paginator = Paginator::<Embed, Box<InteractionCreate>>::new(renderer)
        .set_pages(Arc::clone(state.pages()))?
        .attach(collector);

    let paginator = match owner {
        Some(owner) => paginator.owner(owner.get()),
        None => paginator,
    };

    Ok(paginator.start()?)
}

/// [`send_paginated`] with [`DEFAULT_TIMEOUT_SECS`].
pub async fn send_paginated_default(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    pages: Vec<Embed>,
    owner: Option<Id<UserMarker>>,
) -> anyhow::Result<RunningPaginator<Embed>> {
    send_paginated(ctx, channel_id, pages, owner, DEFAULT_TIMEOUT_SECS).await
}
