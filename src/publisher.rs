use std::fmt;
use std::sync::Arc;

use crate::pubsub::{PubSub, PubSubError, PubSubResult};

/// A verified topic handle: construction checks the topic exists server-side
/// and fails otherwise. Carries no publish behavior.
pub struct Publisher {
    topic_id: String,
    pubsub: Arc<dyn PubSub>,
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("topic_id", &self.topic_id)
            .finish_non_exhaustive()
    }
}

impl Publisher {
    /// Existence-check failures propagate as-is; a missing topic is the
    /// distinct `TopicMissing` error. Single attempt, no retry.
    pub async fn for_topic(pubsub: Arc<dyn PubSub>, topic_id: &str) -> PubSubResult<Self> {
        if pubsub.topic_exists(topic_id).await? {
            Ok(Self {
                topic_id: topic_id.to_string(),
                pubsub,
            })
        } else {
            Err(PubSubError::TopicMissing(topic_id.to_string()))
        }
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn pubsub(&self) -> Arc<dyn PubSub> {
        Arc::clone(&self.pubsub)
    }
}
