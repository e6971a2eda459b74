//! Per-message collection of component interactions.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;
use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::MessageMarker},
};

use utilize_core::{ComponentHub, EventSource};

/// Component clicks on one message, ending after a period without clicks.
///
/// The hub route is removed when the collector times out or is dropped.
pub struct ComponentCollector {
    hub: ComponentHub,
    message_id: Id<MessageMarker>,
    rx: mpsc::Receiver<Box<InteractionCreate>>,
    idle_timeout: Duration,
}

impl ComponentCollector {
    /// Start collecting clicks for `message_id` from `hub`.
    pub async fn subscribe(
        hub: &ComponentHub,
        message_id: Id<MessageMarker>,
        idle_timeout: Duration,
    ) -> Self {
        let rx = hub.subscribe(message_id).await;
        Self {
            hub: hub.clone(),
            message_id,
            rx,
            idle_timeout,
        }
    }

    pub fn message_id(&self) -> Id<MessageMarker> {
        self.message_id
    }
}

#[async_trait]
impl EventSource<Box<InteractionCreate>> for ComponentCollector {
    async fn next_event(&mut self) -> Option<Box<InteractionCreate>> {
        match tokio::time::timeout(self.idle_timeout, self.rx.recv()).await {
            Ok(event) => event,
            Err(_) => {
                debug!(
                    message_id = self.message_id.get(),
                    "component collector idle, closing"
                );
                self.rx.close();
                self.hub.remove_closed(&self.message_id).await;
                None
            }
        }
    }
}

impl Drop for ComponentCollector {
    fn drop(&mut self) {
        self.rx.close();
        self.hub.try_remove_closed(&self.message_id);
    }
}

/// Message a component interaction was triggered on.
pub fn component_message_id(interaction: &InteractionCreate) -> Option<Id<MessageMarker>> {
    match interaction.data.as_ref()? {
        InteractionData::MessageComponent(_) => interaction.message.as_ref().map(|m| m.id),
        _ => None,
    }
}

/// Hand a component interaction to the collector of its message.
///
/// Gives the interaction back when no collector is listening.
pub async fn route_component(
    hub: &ComponentHub,
    interaction: Box<InteractionCreate>,
) -> Result<(), Box<InteractionCreate>> {
    let Some(message_id) = component_message_id(&interaction) else {
        return Err(interaction);
    };

    hub.dispatch(&message_id, interaction).await
}
