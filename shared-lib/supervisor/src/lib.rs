//! Shared-fate supervisor
//!
//! Runs a fixed set of [`ServiceUnit`]s concurrently in one process. The
//! first unit to fail cancels every other unit; the group then drains and
//! reports that first failure. Restarting is left to whatever manages the
//! process.
//!
//! ```text
//! root token ──child──► group token ──clone──► Shutdown (one per unit)
//!                           ▲
//!      first unit error ────┘ cancel()
//! ```

pub mod error;
pub mod signal;
pub mod supervisor;
pub mod unit;

pub use error::SupervisorError;
pub use signal::{wait_for_shutdown_signal, ShutdownSignal};
pub use supervisor::{GroupState, Supervisor, UnitState, DEFAULT_GRACE};
pub use tokio_util::sync::CancellationToken;
pub use unit::{ServiceUnit, Shutdown, UnitFn};
