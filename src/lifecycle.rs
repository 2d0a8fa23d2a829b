use std::future::Future;

use futures::future::BoxFuture;
use thiserror::Error;
use tracing::{info, warn};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type StopHook = BoxFuture<'static, Result<(), BoxError>>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("stop hook `{0}` failed: {1}")]
    Stop(&'static str, String),
}

/// Ordered start/stop wiring without a container: start is plain sequential
/// code in `main`, and stop hooks registered here run in reverse registration
/// order at shutdown.
#[derive(Default)]
pub struct Lifecycle {
    stops: Vec<(&'static str, StopHook)>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_stop<F>(&mut self, name: &'static str, hook: F)
    where
        F: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.stops.push((name, Box::pin(hook)));
    }

    /// Every hook runs even after a failure; the first failure is returned.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        let mut first_err = None;
        for (name, hook) in self.stops.into_iter().rev() {
            info!(hook = name, "running stop hook");
            if let Err(err) = hook.await {
                warn!(hook = name, error = %err, "stop hook failed");
                first_err.get_or_insert(LifecycleError::Stop(name, err.to_string()));
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
