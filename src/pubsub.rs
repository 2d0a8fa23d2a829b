use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use google_cloud_pubsub::client::google_cloud_auth::credentials::CredentialsFile;
use google_cloud_pubsub::client::{Client, ClientConfig};
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum PubSubError {
    #[error("pub/sub connect failed: {0}")]
    Connect(String),
    #[error("topic existence check failed: {0}")]
    ExistsCheck(String),
    #[error("topic `{0}` does not exist")]
    TopicMissing(String),
    #[error("pub/sub close failed: {0}")]
    Close(String),
}

pub type PubSubResult<T> = Result<T, PubSubError>;

/// Read-side surface of the managed Pub/Sub connection, shared by the HTTP
/// handlers and the shutdown path. Existence is checked server-side on every
/// call, never cached.
#[async_trait]
pub trait PubSub: Send + Sync {
    async fn topic_exists(&self, topic_id: &str) -> PubSubResult<bool>;
    async fn close(&self) -> PubSubResult<()>;
}

pub struct GooglePubSub {
    client: Client,
}

/// Single connection attempt against the managed service. A failure here is
/// terminal for startup; no handle exists until this returns `Ok`.
pub async fn connect(cfg: &AppConfig) -> PubSubResult<GooglePubSub> {
    info!(project = %cfg.project_id, "connecting to Pub/Sub");
    let credentials = CredentialsFile::new_from_file(cfg.credentials_path.clone())
        .await
        .map_err(|err| PubSubError::Connect(err.to_string()))?;
    let mut config = ClientConfig::default()
        .with_credentials(credentials)
        .await
        .map_err(|err| PubSubError::Connect(err.to_string()))?;
    // The configured project wins over whatever the key file carries.
    config.project_id = Some(cfg.project_id.clone());
    let client = Client::new(config)
        .await
        .map_err(|err| PubSubError::Connect(err.to_string()))?;
    info!("connected to Pub/Sub");
    Ok(GooglePubSub { client })
}

#[async_trait]
impl PubSub for GooglePubSub {
    async fn topic_exists(&self, topic_id: &str) -> PubSubResult<bool> {
        self.client
            .topic(topic_id)
            .exists(None)
            .await
            .map_err(|err| PubSubError::ExistsCheck(err.to_string()))
    }

    async fn close(&self) -> PubSubResult<()> {
        // No publishers are ever started, so there is nothing to flush; the
        // gRPC channels are torn down when the client drops.
        info!("closing Pub/Sub connection");
        Ok(())
    }
}

/// Canned client for tests and offline wiring: answers every existence check
/// the same way and counts close calls.
pub struct StaticPubSub {
    exists: Option<bool>,
    closes: AtomicUsize,
}

impl StaticPubSub {
    pub fn healthy() -> Self {
        Self {
            exists: Some(true),
            closes: AtomicUsize::new(0),
        }
    }

    pub fn missing_topics() -> Self {
        Self {
            exists: Some(false),
            closes: AtomicUsize::new(0),
        }
    }

    /// Every existence check fails, as if the service were unreachable.
    pub fn unreachable() -> Self {
        Self {
            exists: None,
            closes: AtomicUsize::new(0),
        }
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PubSub for StaticPubSub {
    async fn topic_exists(&self, topic_id: &str) -> PubSubResult<bool> {
        match self.exists {
            Some(exists) => Ok(exists),
            None => Err(PubSubError::ExistsCheck(format!(
                "simulated outage checking `{topic_id}`"
            ))),
        }
    }

    async fn close(&self) -> PubSubResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
