//! Shared-fate behaviour of the supervisor.
//!
//! All tests run with paused time, so sleeps and grace periods advance
//! instantly once every task is idle.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use supervisor::{CancellationToken, ServiceUnit, Shutdown, Supervisor, SupervisorError, UnitFn};
use tokio::time::{sleep, timeout, Instant};

const GRACE: Duration = Duration::from_secs(2);

/// Waits for cancellation, counts itself as stopped and returns cleanly.
fn cooperative(name: &str, stopped: Arc<AtomicUsize>) -> Box<dyn ServiceUnit> {
    UnitFn::boxed(name, move |shutdown: Shutdown| async move {
        shutdown.cancelled().await;
        stopped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

fn failing_after(name: &str, delay: Duration, message: &'static str) -> Box<dyn ServiceUnit> {
    UnitFn::boxed(name, move |_shutdown: Shutdown| async move {
        sleep(delay).await;
        Err(anyhow::anyhow!("{message}"))
    })
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_cancels_every_unit() {
    let stopped = Arc::new(AtomicUsize::new(0));
    let root = CancellationToken::new();
    let failure_at = Duration::from_millis(100);
    let units = vec![
        cooperative("http", stopped.clone()),
        cooperative("grpc", stopped.clone()),
        failing_after("worker", failure_at, "worker crashed"),
    ];

    let started = Instant::now();
    let result = timeout(
        failure_at + GRACE,
        Supervisor::new(GRACE).supervise(units, &root),
    )
    .await
    .expect("group must drain within the grace period");

    match result {
        Err(SupervisorError::UnitFailed { unit, source }) => {
            assert_eq!(unit, "worker");
            assert_eq!(source.to_string(), "worker crashed");
        }
        other => panic!("expected a unit failure, got {other:?}"),
    }
    assert_eq!(stopped.load(Ordering::SeqCst), 2);
    assert!(started.elapsed() < failure_at + GRACE);
    // A unit failure cancels the group, never the caller's token.
    assert!(!root.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_first_error_is_by_completion_order() {
    let units = vec![
        failing_after("slow", Duration::from_millis(200), "slow failure"),
        failing_after("fast", Duration::from_millis(50), "fast failure"),
    ];

    let err = Supervisor::new(GRACE)
        .supervise(units, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.unit(), "fast");
    assert!(err.to_string().contains("fast failure"));
}

#[tokio::test(start_paused = true)]
async fn test_simultaneous_failures_surface_one_error() {
    let stopped = Arc::new(AtomicUsize::new(0));
    let tick = Duration::from_millis(10);
    let units = vec![
        failing_after("left", tick, "left failed"),
        failing_after("right", tick, "right failed"),
        // Fails in reaction to the cancellation the first failure caused.
        UnitFn::boxed("reactive", |shutdown: Shutdown| async move {
            shutdown.cancelled().await;
            Err(anyhow::anyhow!("interrupted"))
        }),
        cooperative("bystander", stopped.clone()),
    ];

    let err = timeout(
        tick + GRACE,
        Supervisor::new(GRACE).supervise(units, &CancellationToken::new()),
    )
    .await
    .expect("group must drain within the grace period")
    .unwrap_err();

    let unit = err.unit();
    assert!(unit == "left" || unit == "right", "unexpected first failure from {unit}");
    assert_eq!(stopped.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_external_stop_shuts_down_cleanly() {
    let stopped = Arc::new(AtomicUsize::new(0));
    let root = CancellationToken::new();
    let units = vec![
        cooperative("books", stopped.clone()),
        cooperative("authors", stopped.clone()),
        cooperative("metrics", stopped.clone()),
    ];

    let trigger = root.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = timeout(
        Duration::from_millis(50) + GRACE,
        Supervisor::new(GRACE).supervise(units, &root),
    )
    .await
    .expect("group must drain within the grace period");

    assert!(result.is_ok(), "clean shutdown must not report an error: {result:?}");
    assert_eq!(stopped.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_error_while_draining_after_external_stop_is_reported() {
    let root = CancellationToken::new();
    let units = vec![
        UnitFn::boxed("cache", |shutdown: Shutdown| async move {
            shutdown.cancelled().await;
            Err(anyhow::anyhow!("flush failed"))
        }),
        cooperative("http", Arc::new(AtomicUsize::new(0))),
    ];

    root.cancel();
    let err = Supervisor::new(GRACE)
        .supervise(units, &root)
        .await
        .unwrap_err();

    assert_eq!(err.unit(), "cache");
}

#[tokio::test(start_paused = true)]
async fn test_unit_finishing_early_does_not_cancel_group() {
    let root = CancellationToken::new();
    let cancelled_early = Arc::new(AtomicBool::new(true));
    let observed = cancelled_early.clone();

    let units = vec![
        UnitFn::boxed("migrations", |_shutdown: Shutdown| async move { Ok(()) }),
        UnitFn::boxed("server", move |shutdown: Shutdown| async move {
            sleep(Duration::from_millis(50)).await;
            observed.store(shutdown.is_cancelled(), Ordering::SeqCst);
            shutdown.cancelled().await;
            Ok(())
        }),
    ];

    let trigger = root.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    Supervisor::new(GRACE).supervise(units, &root).await.unwrap();
    assert!(!cancelled_early.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_unit_ignoring_cancellation_blocks_supervisor() {
    let units = vec![
        UnitFn::boxed("stubborn", |_shutdown: Shutdown| async move {
            std::future::pending::<()>().await;
            Ok(())
        }),
        failing_after("trigger", Duration::from_millis(10), "trigger"),
    ];

    // Documented limitation: no forced termination, so this hangs.
    let result = timeout(
        GRACE * 3,
        Supervisor::new(GRACE).supervise(units, &CancellationToken::new()),
    )
    .await;

    assert!(result.is_err(), "supervisor returned although a unit never stopped");
}
