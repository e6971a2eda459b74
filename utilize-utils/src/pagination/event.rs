use twilight_model::{
    application::interaction::InteractionData, gateway::payload::incoming::InteractionCreate,
};

/// A button click as seen by a paginator.
pub trait ComponentEvent: Send + Sync + 'static {
    /// Custom ID of the clicked component, if this is a component event.
    fn custom_id(&self) -> Option<&str>;

    /// ID of the user who clicked.
    fn actor_id(&self) -> Option<u64>;
}

impl ComponentEvent for InteractionCreate {
    fn custom_id(&self) -> Option<&str> {
        match self.data.as_ref()? {
            InteractionData::MessageComponent(data) => Some(data.custom_id.as_str()),
            _ => None,
        }
    }

    fn actor_id(&self) -> Option<u64> {
        self.author_id().map(|id| id.get())
    }
}

impl<E: ComponentEvent + ?Sized> ComponentEvent for Box<E> {
    fn custom_id(&self) -> Option<&str> {
        (**self).custom_id()
    }

    fn actor_id(&self) -> Option<u64> {
        (**self).actor_id()
    }
}
