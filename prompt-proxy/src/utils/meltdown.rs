use std::{fmt, future::Future};

use futures::future::BoxFuture;
use meltdown::Token;
use tracing::{debug, info};

use crate::error::runtime::RuntimeError;

/// Pairs a service's output with a name so the supervisor loop can tell
/// which service stopped.
pub struct TaggedService<S> {
    tag: &'static str,
    service: S,
}

impl<S> TaggedService<S> {
    pub fn new(tag: &'static str, service: S) -> Self {
        Self { tag, service }
    }
}

impl<S> fmt::Debug for TaggedService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedService")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl<S, T> meltdown::Service for TaggedService<S>
where
    S: meltdown::Service,
    S::Future: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    type Future = BoxFuture<'static, (&'static str, T)>;

    fn run(self, token: Token) -> Self::Future {
        let tag = self.tag;
        let future = self.service.run(token);
        Box::pin(async move { (tag, future.await) })
    }
}

/// Completes on SIGINT or SIGTERM, or when another service triggers
/// shutdown first.
pub async fn wait_for_shutdown_signals(
    mut token: Token,
) -> Result<(), RuntimeError> {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.map_err(RuntimeError::Signal)?;
            info!("received SIGINT, shutting down");
        }
        result = terminate() => {
            result.map_err(RuntimeError::Signal)?;
            info!("received SIGTERM, shutting down");
        }
        () = &mut token => {
            debug!("shutdown signal listener stopped");
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn terminate() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};
    signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> std::io::Result<()> {
    std::future::pending().await
}
