//! Generic subsystem runtime — shared scaffolding for long-running channels.
//!
//! # Component model
//!
//! A [`Component`] is an independently-runnable unit owned by a subsystem,
//! such as the HTTP front or the console. The subsystem builds components
//! with their shared state already captured inside them, then hands them to
//! [`spawn_components`].
//!
//! # SubsystemHandle
//!
//! [`spawn_components`] returns a [`SubsystemHandle`] that the caller can
//! `.await` (blocking until all components finish) or hold onto while doing
//! other work. The components run concurrently regardless.
//! Any component error or panic cancels the shared [`CancellationToken`] so
//! sibling components and `main` all shut down cleanly.

use std::future::Future;
use std::pin::Pin;

use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::AppError;

// ── Component ─────────────────────────────────────────────────────────────────

/// A boxed, owned future returned by [`Component::run`].
pub type ComponentFuture =
    Pin<Box<dyn Future<Output = Result<(), AppError>> + Send + 'static>>;

/// A self-contained, concurrently-runnable unit owned by a subsystem.
///
/// Implementors capture all shared state (`Arc<CommsState>`, cookie keys, …)
/// at construction time. [`Component::run`] is called once by
/// [`spawn_components`] and should run until `shutdown` is cancelled or the
/// component's own work is done.
pub trait Component: Send + 'static {
    /// Stable identifier used in log messages.
    fn id(&self) -> &str;

    /// Consume the component and return its async run-loop as a boxed future.
    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture;
}

// ── SubsystemHandle ───────────────────────────────────────────────────────────

/// An opaque handle to a running component set.
pub struct SubsystemHandle {
    inner: JoinHandle<Result<(), AppError>>,
}

impl SubsystemHandle {
    /// Await all components and return the first error, if any.
    pub async fn join(self) -> Result<(), AppError> {
        match self.inner.await {
            Ok(r) => r,
            Err(e) => Err(AppError::Comms(format!("subsystem task panicked: {e}"))),
        }
    }
}

// ── spawn_components ──────────────────────────────────────────────────────────

/// Spawn each [`Component`] as an independent Tokio task and return a
/// [`SubsystemHandle`] that resolves when all components have exited.
///
/// Behaviour on error:
/// - If any component returns `Err` or panics, `shutdown` is cancelled so all
///   siblings receive the cancellation signal and stop cooperatively.
/// - The manager task then drains the remaining components and returns the
///   first error encountered.
pub fn spawn_components(
    components: Vec<Box<dyn Component>>,
    shutdown: CancellationToken,
) -> SubsystemHandle {
    let handle = tokio::spawn(async move {
        let mut set: JoinSet<(String, Result<(), AppError>)> = JoinSet::new();

        for component in components {
            let id = component.id().to_string();
            let fut = component.run(shutdown.clone());
            debug!(component = %id, "spawning component");
            set.spawn(async move { (id, fut.await) });
        }

        let mut first_err: Option<AppError> = None;

        while let Some(res) = set.join_next().await {
            match res {
                Err(e) => {
                    error!("component panicked: {e}");
                    shutdown.cancel();
                    first_err.get_or_insert_with(|| {
                        AppError::Comms(format!("component panicked: {e}"))
                    });
                }
                Ok((id, Err(e))) => {
                    error!(component = %id, "component error: {e}");
                    shutdown.cancel();
                    first_err.get_or_insert(e);
                }
                Ok((id, Ok(()))) => debug!(component = %id, "component exited"),
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    });

    SubsystemHandle { inner: handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Waits for shutdown, or fails immediately when `fail` is set.
    struct Probe {
        id: &'static str,
        fail: bool,
    }

    impl Component for Probe {
        fn id(&self) -> &str {
            self.id
        }

        fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
            Box::pin(async move {
                if self.fail {
                    return Err(AppError::Comms(format!("{} failed", self.id)));
                }
                shutdown.cancelled().await;
                Ok(())
            })
        }
    }

    #[tokio::test]
    async fn empty_set_resolves_ok() {
        assert!(spawn_components(Vec::new(), CancellationToken::new()).join().await.is_ok());
    }

    #[tokio::test]
    async fn cancellation_stops_components() {
        let token = CancellationToken::new();
        let handle = spawn_components(vec![Box::new(Probe { id: "a", fail: false })], token.clone());
        token.cancel();
        assert!(handle.join().await.is_ok());
    }

    #[tokio::test]
    async fn error_cancels_siblings_and_surfaces() {
        let token = CancellationToken::new();
        let handle = spawn_components(
            vec![
                Box::new(Probe { id: "waiter", fail: false }),
                Box::new(Probe { id: "broken", fail: true }),
            ],
            token.clone(),
        );
        let err = handle.join().await.unwrap_err();
        assert!(err.to_string().contains("broken failed"));
        assert!(token.is_cancelled());
    }
}
