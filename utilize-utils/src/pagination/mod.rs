//! Stable facade for pagination helpers used by command handlers.

/// Default idle timeout for button-based pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub mod collector;
mod components;
pub mod event;
pub mod paginator;
pub mod respond;
pub mod state;

pub use collector::{ComponentCollector, component_message_id, route_component};
pub use components::build_nav_components;
pub use event::ComponentEvent;
pub use paginator::{PageRenderer, Paginator, RunningPaginator};
pub use respond::{
    EmbedPageRenderer, respond_ephemeral_message, respond_update_message, respond_wrong_user,
    send_paginated, send_paginated_default,
};
pub use state::{ButtonRow, NavAction, NavButton, NavSlot, PagerState, label_custom_id};
