use std::sync::Arc;

use crate::pubsub::PubSub;

/// Shared handler state. The single client handle is shared read-only; the
/// underlying client is safe for concurrent use, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pubsub: Arc<dyn PubSub>,
}

impl AppState {
    pub fn new(pubsub: Arc<dyn PubSub>) -> Self {
        Self { pubsub }
    }

    pub fn pubsub(&self) -> Arc<dyn PubSub> {
        Arc::clone(&self.pubsub)
    }
}
