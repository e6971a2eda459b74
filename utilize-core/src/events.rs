//! Event sources and a keyed fan-out hub.
//!
//! Components in this workspace never register global listeners. They are
//! handed an [`EventSource`] and pull events from it until it ends.

use std::{collections::HashMap, hash::Hash, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use twilight_model::{
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::MessageMarker},
};

/// Per-subscription buffer used by [`EventHub::subscribe`].
pub const DEFAULT_HUB_CAPACITY: usize = 16;

/// A stream of events consumed by a single owner.
///
/// `None` means the source is exhausted and will not yield again.
#[async_trait]
pub trait EventSource<E>: Send {
    async fn next_event(&mut self) -> Option<E>;
}

#[async_trait]
impl<E: Send> EventSource<E> for mpsc::Receiver<E> {
    async fn next_event(&mut self) -> Option<E> {
        self.recv().await
    }
}

#[async_trait]
impl<E: Send> EventSource<E> for mpsc::UnboundedReceiver<E> {
    async fn next_event(&mut self) -> Option<E> {
        self.recv().await
    }
}

#[async_trait]
impl<E: Send, S: EventSource<E> + ?Sized> EventSource<E> for Box<S> {
    async fn next_event(&mut self) -> Option<E> {
        (**self).next_event().await
    }
}

/// Routes events to at most one subscriber per key.
///
/// Routes whose receiver was dropped are pruned on the next dispatch.
pub struct EventHub<K, E> {
    routes: Arc<Mutex<HashMap<K, mpsc::Sender<E>>>>,
    capacity: usize,
}

/// Hub routing component interactions to the collector of their message.
pub type ComponentHub = EventHub<Id<MessageMarker>, Box<InteractionCreate>>;

impl<K, E> Clone for EventHub<K, E> {
    fn clone(&self) -> Self {
        Self {
            routes: Arc::clone(&self.routes),
            capacity: self.capacity,
        }
    }
}

impl<K, E> Default for EventHub<K, E> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HUB_CAPACITY)
    }
}

impl<K, E> EventHub<K, E> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            routes: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }
}

impl<K, E> EventHub<K, E>
where
    K: Eq + Hash + Send,
    E: Send,
{
    /// Register a subscriber for `key`, replacing any previous one.
    ///
    /// Routes of subscribers that already went away are swept first.
    pub async fn subscribe(&self, key: K) -> mpsc::Receiver<E> {
        let (tx, rx) = mpsc::channel(self.capacity);
        let mut routes = self.routes.lock().await;
        routes.retain(|_, sender| !sender.is_closed());
        routes.insert(key, tx);
        rx
    }

    /// Drop the route for `key` if its receiver was closed or dropped.
    pub async fn remove_closed(&self, key: &K) -> bool {
        prune_closed(&mut *self.routes.lock().await, key)
    }

    /// Like [`remove_closed`](Self::remove_closed) without waiting; gives up when the routes are locked.
    pub fn try_remove_closed(&self, key: &K) -> bool {
        match self.routes.try_lock() {
            Ok(mut routes) => prune_closed(&mut routes, key),
            Err(_) => false,
        }
    }

    /// Remove the subscriber for `key`, ending its stream.
    pub async fn unsubscribe(&self, key: &K) -> bool {
        self.routes.lock().await.remove(key).is_some()
    }

    /// Deliver `event` to the subscriber of `key`.
    ///
    /// Gives the event back when nobody is listening.
    pub async fn dispatch(&self, key: &K, event: E) -> Result<(), E> {
        let sender = {
            let routes = self.routes.lock().await;
            match routes.get(key) {
                Some(sender) => sender.clone(),
                None => return Err(event),
            }
        };

        match sender.send(event).await {
            Ok(()) => Ok(()),
            Err(mpsc::error::SendError(event)) => {
                let mut routes = self.routes.lock().await;
                if routes.get(key).is_some_and(|current| current.same_channel(&sender)) {
                    routes.remove(key);
                }
                Err(event)
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.routes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn prune_closed<K: Eq + Hash, E>(routes: &mut HashMap<K, mpsc::Sender<E>>, key: &K) -> bool {
    if routes.get(key).is_some_and(mpsc::Sender::is_closed) {
        routes.remove(key);
        true
    } else {
        false
    }
}
