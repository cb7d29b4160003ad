//! The contract every supervised service exposes.

use std::future::{Future, IntoFuture};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Cancellation handle given to a running unit.
///
/// All units of a group share the same underlying token. Once it fires, the
/// unit is expected to stop taking new work, finish what is in flight and
/// return within [`Shutdown::grace`].
#[derive(Debug, Clone)]
pub struct Shutdown {
    token: CancellationToken,
    grace: Duration,
}

impl Shutdown {
    pub fn new(token: CancellationToken, grace: Duration) -> Self {
        Self { token, grace }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the group is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Owned variant of [`Shutdown::cancelled`] for APIs that need a
    /// `'static` shutdown future, such as graceful server shutdown.
    pub fn cancelled_owned(self) -> WaitForCancellationFutureOwned {
        self.token.cancelled_owned()
    }

    /// Time the unit has to stop after cancellation.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Drives `serve` until it finishes, giving it at most [`Shutdown::grace`]
    /// once the group is cancelled.
    ///
    /// Returns `None` when the grace period ran out; `serve` is dropped
    /// unfinished at that point.
    pub async fn drain<F: IntoFuture>(&self, serve: F) -> Option<F::Output> {
        let serve = serve.into_future();
        tokio::pin!(serve);
        tokio::select! {
            biased;
            output = &mut serve => return Some(output),
            _ = self.token.cancelled() => {}
        }
        tokio::time::timeout(self.grace, serve).await.ok()
    }
}

/// A long-lived, independently runnable component.
///
/// `run` blocks for the unit's whole operational life. It returns `Ok` after
/// a clean stop and `Err` on a fatal failure, which takes the whole group
/// down. The supervisor never forcibly stops a unit, so a `run` that ignores
/// [`Shutdown`] keeps the group alive forever. Units that serve open-ended
/// work bound it with [`Shutdown::drain`].
#[async_trait]
pub trait ServiceUnit: Send + 'static {
    /// Name used in logs and in [`crate::SupervisorError`].
    fn name(&self) -> &str;

    async fn run(self: Box<Self>, shutdown: Shutdown) -> anyhow::Result<()>;
}

/// Adapts a closure into a [`ServiceUnit`].
pub struct UnitFn<F> {
    name: String,
    run: F,
}

impl<F, Fut> UnitFn<F>
where
    F: FnOnce(Shutdown) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }

    /// Builds the unit already boxed, ready for [`crate::Supervisor::supervise`].
    pub fn boxed(name: impl Into<String>, run: F) -> Box<dyn ServiceUnit> {
        Box::new(Self::new(name, run))
    }
}

#[async_trait]
impl<F, Fut> ServiceUnit for UnitFn<F>
where
    F: FnOnce(Shutdown) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(self: Box<Self>, shutdown: Shutdown) -> anyhow::Result<()> {
        (self.run)(shutdown).await
    }
}
