use std::sync::Arc;

use twilight_http::Client;

/// Typed error taxonomy shared by the helper crates.
pub mod error;
/// Event-source abstraction and keyed event routing.
pub mod events;

pub use error::{UtilizeError, UtilizeResult};
pub use events::{ComponentHub, EventHub, EventSource};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub components: ComponentHub,
}

impl Context {
    /// Create a new application context with an empty component hub.
    pub fn new(http: Arc<Client>) -> Self {
        Self {
            http,
            components: ComponentHub::default(),
        }
    }
}
