//! # Supervisor: runs units under a shared fate.
//!
//! ```text
//! supervise(units, root)
//!   group = root.child_token()
//!   spawn unit[0..N].run(Shutdown(group))          Starting ─► Running
//!   loop:
//!     unit exits Err  ─► first error? record + group.cancel()
//!     group cancelled ─► Draining, arm grace watchdog
//!     watchdog fires  ─► log units still running, keep waiting
//!     all joined      ─► Terminated(first error | Ok)
//! ```
//!
//! Cancelling `root` from outside drains the group the same way, but the
//! result only reflects errors returned by units.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::SupervisorError;
use crate::unit::{ServiceUnit, Shutdown};

/// Grace period used when none is configured.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);

/// Lifecycle of a single unit inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Pending,
    Running,
    Succeeded,
    Failed,
    CancelledThenStopped,
}

/// Lifecycle of the group as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    Starting,
    Running,
    Draining,
    Terminated,
}

/// Runs service units concurrently and stops all of them on the first failure.
#[derive(Debug, Clone)]
pub struct Supervisor {
    grace: Duration,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE)
    }
}

impl Supervisor {
    pub fn new(grace: Duration) -> Self {
        Self { grace }
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Runs every unit until all of them have returned.
    ///
    /// Returns the first unit error by completion order, or `Ok(())` if every
    /// unit returned cleanly. Blocks for as long as any unit keeps running,
    /// including past the grace period.
    pub async fn supervise(
        &self,
        units: Vec<Box<dyn ServiceUnit>>,
        root: &CancellationToken,
    ) -> Result<(), SupervisorError> {
        let mut group = Group::new(root.child_token(), &units);
        let mut set = JoinSet::new();
        let mut tasks = HashMap::new();

        for (index, unit) in units.into_iter().enumerate() {
            let shutdown = Shutdown::new(group.token.clone(), self.grace);
            group.mark_running(index);
            let handle = set.spawn(async move {
                let outcome = AssertUnwindSafe(unit.run(shutdown)).catch_unwind().await;
                let result = outcome.unwrap_or_else(|panic| {
                    Err(anyhow::anyhow!("unit panicked: {}", panic_message(&*panic)))
                });
                (index, result)
            });
            tasks.insert(handle.id(), index);
        }
        group.transition(GroupState::Running);

        let token = group.token.clone();
        let mut grace_deadline: Option<Instant> = None;
        let mut grace_reported = false;

        loop {
            tokio::select! {
                joined = set.join_next() => match joined {
                    Some(Ok((index, result))) => group.record_exit(index, result),
                    Some(Err(join_error)) => {
                        let index = tasks.get(&join_error.id()).copied();
                        group.record_join_error(index, join_error);
                    }
                    None => break,
                },
                _ = token.cancelled(), if grace_deadline.is_none() => {
                    group.transition(GroupState::Draining);
                    grace_deadline = Some(Instant::now() + self.grace);
                }
                _ = sleep_until(grace_deadline.unwrap_or_else(Instant::now)),
                    if grace_deadline.is_some() && !grace_reported =>
                {
                    grace_reported = true;
                    error!(
                        grace = ?self.grace,
                        stuck = ?group.running_units(),
                        "units did not stop within the grace period; still waiting"
                    );
                }
            }
        }

        group.transition(GroupState::Terminated);
        group.into_result()
    }
}

struct UnitRecord {
    name: String,
    state: UnitState,
}

/// Supervision group: one shared token and one first-error slot.
struct Group {
    token: CancellationToken,
    state: GroupState,
    units: Vec<UnitRecord>,
    first_error: Option<SupervisorError>,
}

impl Group {
    fn new(token: CancellationToken, units: &[Box<dyn ServiceUnit>]) -> Self {
        let units = units
            .iter()
            .map(|unit| UnitRecord {
                name: unit.name().to_string(),
                state: UnitState::Pending,
            })
            .collect();
        Self {
            token,
            state: GroupState::Starting,
            units,
            first_error: None,
        }
    }

    fn transition(&mut self, next: GroupState) {
        if self.state == next {
            return;
        }
        match next {
            GroupState::Draining => {
                let cause = match &self.first_error {
                    Some(_) => "unit failure",
                    None => "external shutdown",
                };
                info!(cause = %cause, running = ?self.running_units(), "group draining");
            }
            _ => info!(
                from = ?self.state,
                to = ?next,
                units = self.units.len(),
                "group state changed"
            ),
        }
        self.state = next;
    }

    fn mark_running(&mut self, index: usize) {
        let record = &mut self.units[index];
        record.state = UnitState::Running;
        info!(unit = %record.name, "unit started");
    }

    fn record_exit(&mut self, index: usize, result: anyhow::Result<()>) {
        let cancelled = self.token.is_cancelled();
        let record = &mut self.units[index];

        match result {
            Ok(()) if cancelled => {
                record.state = UnitState::CancelledThenStopped;
                info!(unit = %record.name, "unit stopped after cancellation");
            }
            Ok(()) => {
                record.state = UnitState::Succeeded;
                info!(unit = %record.name, "unit finished");
            }
            Err(source) => {
                record.state = UnitState::Failed;
                if self.first_error.is_some() {
                    warn!(
                        unit = %record.name,
                        error = %source,
                        "discarding subsequent unit failure"
                    );
                    return;
                }
                error!(unit = %record.name, error = %source, "unit failed; cancelling group");
                self.first_error = Some(SupervisorError::UnitFailed {
                    unit: record.name.clone(),
                    source,
                });
                self.token.cancel();
            }
        }
    }

    /// A unit task that was aborted or torn down with its runtime.
    fn record_join_error(&mut self, index: Option<usize>, join_error: JoinError) {
        let source = anyhow::anyhow!("unit task ended abnormally: {join_error}");
        match index {
            Some(index) => self.record_exit(index, Err(source)),
            None => {
                error!(error = %source, "unidentified task ended abnormally; cancelling group");
                if self.first_error.is_none() {
                    self.first_error = Some(SupervisorError::UnitFailed {
                        unit: "<unknown>".to_string(),
                        source,
                    });
                }
                self.token.cancel();
            }
        }
    }

    fn running_units(&self) -> Vec<&str> {
        self.units
            .iter()
            .filter(|unit| unit.state == UnitState::Running)
            .map(|unit| unit.name.as_str())
            .collect()
    }

    fn into_result(self) -> Result<(), SupervisorError> {
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
