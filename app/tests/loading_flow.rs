//! End-to-end behaviour of the loading store through the public API, the way
//! pages drive it: context lookup, component transitions and wrapped fetches.

use std::time::Duration;

use app::loading::{
    ComponentLoading, InitialLoadTimings, LoaderOptionsPatch,
    LoaderPosition, LoadingState, LoadingStore, provide_loading, run_with_loader, use_data_loading,
    use_loading,
};
use leptos::prelude::Owner;
use tokio::sync::oneshot;

#[test]
fn last_call_decides_visibility() {
    let store = LoadingStore::new();
    let calls = [true, true, false, true, false, false, true];

    for show in calls {
        if show {
            store.show(None, LoaderOptionsPatch::default());
        } else {
            store.hide();
        }
        assert_eq!(store.snapshot_untracked().is_loading, show);
    }
}

#[test]
fn hiding_a_hidden_store_changes_nothing() {
    let store = LoadingStore::new();
    store.show(
        Some("Loading events..."),
        LoaderOptionsPatch::default().position(LoaderPosition::Center),
    );
    store.hide();
    let before = store.snapshot_untracked();

    store.hide();
    assert_eq!(store.snapshot_untracked(), before);
}

#[test]
fn idle_component_issues_nothing() {
    let store = LoadingStore::new();
    let mut tracker = ComponentLoading::default();

    assert_eq!(tracker.update(false, None, store), None);
    assert_eq!(store.snapshot_untracked(), LoadingState::default());
}

#[test]
fn component_cycle_survives_handle_refetch() {
    let owner = Owner::new();
    owner.with(|| {
        provide_loading();
        let mut shown = Vec::new();
        let mut tracker = ComponentLoading::default();

        for busy in [false, true, true, false, false] {
            let store = use_loading();
            tracker.update(busy, Some("Loading city..."), store);
            shown.push(store.snapshot_untracked().is_loading);
        }

        assert_eq!(shown, [false, true, true, false, false]);
        assert_eq!(use_loading().snapshot_untracked().message, "Loading city...");
    });
}

#[tokio::test]
async fn failed_fetch_is_hidden_before_the_caller_sees_the_error() {
    let owner = Owner::new();
    let store = owner.with(provide_loading);
    let data_loading = owner.with(use_data_loading);

    let result: Result<(), &str> = data_loading
        .fetch_with_loading(
            || async {
                assert!(store.snapshot_untracked().is_loading);
                Err("backend down")
            },
            Some("Loading events..."),
            LoaderOptionsPatch::default().position(LoaderPosition::Center),
        )
        .await;

    assert_eq!(result, Err("backend down"));
    assert!(!store.snapshot_untracked().is_loading);
}

#[tokio::test]
async fn overlapping_fetches_share_one_flag() {
    let store = LoadingStore::new();
    let (finish_a, a_done) = oneshot::channel::<()>();
    let (finish_b, b_done) = oneshot::channel::<()>();

    let a = run_with_loader(
        store,
        || async move {
            let _ = a_done.await;
            "a"
        },
        Some("X"),
        LoaderOptionsPatch::default(),
    );
    let b = run_with_loader(
        store,
        || async move {
            let _ = b_done.await;
            "b"
        },
        Some("Y"),
        LoaderOptionsPatch::default(),
    );

    let mut a = tokio_test::task::spawn(a);
    let mut b = tokio_test::task::spawn(b);
    assert!(a.poll().is_pending());
    assert!(b.poll().is_pending());
    assert_eq!(store.snapshot_untracked().message, "Y");

    let _ = finish_b.send(());
    assert_eq!(b.poll(), std::task::Poll::Ready("b"));
    assert!(
        !store.snapshot_untracked().is_loading,
        "the first fetch to finish hides the loader for both"
    );

    let _ = finish_a.send(());
    assert_eq!(a.poll(), std::task::Poll::Ready("a"));
    assert!(!store.snapshot_untracked().is_loading);
}

#[test]
fn initial_loader_honours_minimum_and_fallback() {
    let timings = InitialLoadTimings::default();

    let early_load = timings.replay(Some(Duration::from_millis(200)));
    assert_eq!(early_load, Duration::from_millis(1200));
    assert_eq!(early_load, timings.hide_at(Some(Duration::from_millis(200))));

    let late_load = timings.replay(Some(Duration::from_millis(2000)));
    assert_eq!(late_load, Duration::from_millis(2000));

    let never_loaded = timings.replay(None);
    assert_eq!(never_loaded, Duration::from_millis(3000));
    assert_eq!(never_loaded, timings.hide_at(None));
}

/// Effects only run with the `hydrate` feature and a spawner installed.
#[cfg(feature = "hydrate")]
mod component_effects {
    use std::sync::{Arc, Mutex};

    use any_spawner::Executor;
    use app::loading::{LoaderOptionsPatch, provide_loading, use_component_loading};
    use leptos::prelude::*;

    async fn settle() {
        for _ in 0..8 {
            Executor::tick().await;
        }
    }

    #[tokio::test]
    async fn store_writes_never_retrigger_the_component_hook() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        tokio::task::LocalSet::new()
            .run_until(async {
                let store = provide_loading();
                let writes = Arc::new(Mutex::new(Vec::new()));
                Effect::new({
                    let writes = Arc::clone(&writes);
                    move |_| {
                        let state = store.snapshot();
                        writes.lock().unwrap().push((state.is_loading, state.message));
                    }
                });
                settle().await;

                let busy = RwSignal::new(false);
                use_component_loading(busy, Some("Loading city..."));
                settle().await;
                assert!(!store.snapshot_untracked().is_loading, "idle mount issues nothing");

                busy.set(true);
                settle().await;
                assert!(store.snapshot_untracked().is_loading);

                store.show(Some("Refreshing events..."), LoaderOptionsPatch::default());
                settle().await;

                busy.set(false);
                settle().await;
                assert!(!store.snapshot_untracked().is_loading);

                store.show(Some("Sending message..."), LoaderOptionsPatch::default());
                settle().await;
                assert!(
                    store.snapshot_untracked().is_loading,
                    "an outside show is left alone by an idle component"
                );

                let writes = writes.lock().unwrap().clone();
                assert_eq!(
                    writes,
                    [
                        (false, "Loading...".to_owned()),
                        (true, "Loading city...".to_owned()),
                        (true, "Refreshing events...".to_owned()),
                        (false, "Refreshing events...".to_owned()),
                        (true, "Sending message...".to_owned()),
                    ]
                );
            })
            .await;
    }
}
