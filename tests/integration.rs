// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios through the assembled snackbar system.

use snackbar_kit::{
    DragAnchor, Icon, Observable, SnackbarDuration, SnackbarEvent, SnackbarId, SnackbarSystem,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Routes crate debug logs into the test output when RUST_LOG asks for
/// them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn message(text: &str) -> SnackbarEvent {
    SnackbarEvent::message(text, Icon::new("info"), SnackbarDuration::Short)
}

/// Lets spawned tasks catch up without advancing the paused clock.
async fn settle() {
    for _ in 0..30 {
        tokio::task::yield_now().await;
    }
}

/// Records every id that ever becomes the displayed request.
fn spawn_display_collector(
    system: &SnackbarSystem,
) -> (Arc<Mutex<Vec<SnackbarId>>>, tokio::task::JoinHandle<()>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut current = system.host_state().subscribe();
    let task = {
        let seen = Arc::clone(&seen);
        tokio::spawn(async move {
            loop {
                if current.changed().await.is_err() {
                    break;
                }
                if let Some(displayed) = current.borrow_and_update().clone() {
                    seen.lock().unwrap().push(displayed.id());
                }
            }
        })
    };
    (seen, task)
}

#[tokio::test(start_paused = true)]
async fn only_the_newest_of_rapid_pushes_is_displayed() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();
    let (seen, collector) = spawn_display_collector(&system);

    let first = message("first");
    let first_id = first.id();
    let second = message("second");
    let second_id = second.id();

    // Both land before the presenter observes either.
    system.controller().push_event(first);
    system.controller().push_event(second);
    settle().await;

    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;

    let displayed = system
        .host_state()
        .current()
        .expect("an event should be showing");
    assert_eq!(displayed.id(), second_id);

    let seen = seen.lock().unwrap().clone();
    assert!(!seen.contains(&first_id), "the stale event must never show");
    assert!(seen.contains(&second_id));

    collector.abort();
}

#[tokio::test(start_paused = true)]
async fn push_while_showing_dismisses_then_enters_after_grace() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    system.controller().push_event(message("first"));
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    assert_eq!(
        system.host_state().current().expect("first showing").event().text(),
        "first"
    );

    system.controller().push_event(message("second"));
    settle().await;
    // Hard-preemptive: the first is gone immediately.
    assert!(system.host_state().current().is_none());

    // The second only enters once the grace interval has elapsed.
    tokio::time::advance(Duration::from_millis(299)).await;
    settle().await;
    assert!(system.host_state().current().is_none());

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(
        system.host_state().current().expect("second showing").event().text(),
        "second"
    );
}

#[tokio::test(start_paused = true)]
async fn at_most_one_request_is_ever_visible() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    let mut pushed = Vec::new();
    for index in 0..5 {
        let event = message(&format!("burst-{index}"));
        pushed.push(event.id());
        system.controller().push_event(event);
        settle().await;

        // Sample between pushes: the slot holds zero or one request, and
        // only ever one of ours.
        if let Some(displayed) = system.host_state().current() {
            assert!(pushed.contains(&displayed.id()));
        }
        tokio::time::advance(Duration::from_millis(100)).await;
    }

    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    let displayed = system
        .host_state()
        .current()
        .expect("the last event should be showing");
    assert_eq!(Some(&displayed.id()), pushed.last());
}

#[tokio::test(start_paused = true)]
async fn short_message_auto_dismisses_on_the_4000ms_boundary() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    system.controller().push_event(message("timed"));
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    assert!(system.host_state().current().is_some());

    tokio::time::advance(Duration::from_millis(3_999)).await;
    settle().await;
    assert!(
        system.host_state().current().is_some(),
        "must not dismiss before the declared duration"
    );

    tokio::time::advance(Duration::from_millis(2)).await;
    settle().await;
    assert!(
        system.host_state().current().is_none(),
        "must dismiss once the declared duration elapses"
    );
}

#[tokio::test(start_paused = true)]
async fn action_click_runs_the_callback_exactly_once() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    let calls = Arc::new(AtomicU32::new(0));
    let event = {
        let calls = Arc::clone(&calls);
        SnackbarEvent::action("Undo delete", Icon::new("trash"), Icon::new("undo"), move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };
    system.controller().push_event(event);
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    assert!(system.host_state().current().is_some());

    // Simulated click on the action control.
    system.host_state().perform_action();
    settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(system.host_state().current().is_none());

    // A second click after resolution is a no-op.
    system.host_state().perform_action();
    settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn teardown_clears_the_displayed_request() {
    init_tracing();
    let system = SnackbarSystem::new();
    let handle = system.start();

    system.controller().push_event(message("doomed"));
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    assert!(system.host_state().current().is_some());

    handle.shutdown();
    settle().await;
    assert!(
        system.host_state().current().is_none(),
        "teardown must not leave a request stuck"
    );
}

#[tokio::test(start_paused = true)]
async fn loading_snackbar_survives_drag_dismiss_attempts() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    let is_loading = Observable::new(true);
    system.controller().push_event(SnackbarEvent::loading(
        "copying",
        Icon::new("copy"),
        is_loading.clone(),
    ));
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    assert!(system.host_state().current().is_some());

    let coordinator = system.coordinator().clone();
    coordinator.drag_start();
    coordinator.drag_by(-10_000.0);
    let target = coordinator.release(-9_000.0).await;

    assert!(!target.is_dismissing());
    let displayed = system
        .host_state()
        .current()
        .expect("loading snackbar must survive the drag");
    assert!(!displayed.is_resolved());
}

#[tokio::test(start_paused = true)]
async fn finished_loading_snackbar_dismisses_after_the_linger() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    let is_loading = Observable::new(true);
    system.controller().push_event(SnackbarEvent::loading(
        "copying",
        Icon::new("copy"),
        is_loading.clone(),
    ));
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;
    assert!(system.host_state().current().is_some());

    is_loading.set(false);
    settle().await;
    tokio::time::advance(Duration::from_millis(2_001)).await;
    settle().await;
    assert!(system.host_state().current().is_none());
}

#[tokio::test(start_paused = true)]
async fn drag_dismissal_resolves_and_surface_returns_to_rest() {
    init_tracing();
    let system = SnackbarSystem::new();
    let _handle = system.start();

    system.controller().push_event(message("swipe me away"));
    settle().await;
    tokio::time::advance(Duration::from_millis(300)).await;
    settle().await;

    let coordinator = system.coordinator().clone();
    coordinator.drag_start();
    coordinator.drag_by(-200.0);

    let release = tokio::spawn(async move { coordinator.release(0.0).await });
    settle().await;
    assert!(
        system.host_state().current().is_none(),
        "reaching the dismissing anchor resolves the request"
    );

    tokio::time::advance(Duration::from_millis(400)).await;
    settle().await;
    assert_eq!(
        release.await.expect("release should finish"),
        DragAnchor::DismissingFromPrimary
    );
    assert_eq!(system.coordinator().state().anchor, DragAnchor::Primary);
}
