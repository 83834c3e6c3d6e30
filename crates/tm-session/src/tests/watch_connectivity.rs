use crate::{ConnectivityObserver, WatchConnectivity};

use googletest::prelude::*;
use tm_core::Environment;
use tokio::sync::broadcast::error::TryRecvError;

#[test]
fn given_offline_observer_when_set_online_then_restored_fires_once() {
    // Given
    let connectivity = WatchConnectivity::offline();
    let mut restored = connectivity.on_restored();

    // When
    connectivity.set_online(true);

    // Then
    assert_that!(connectivity.environment(), eq(Environment::Online));
    assert!(restored.try_recv().is_ok());
    assert!(matches!(restored.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn given_online_observer_when_set_online_again_then_no_event() {
    let connectivity = WatchConnectivity::online();
    let mut restored = connectivity.on_restored();

    connectivity.set_online(true);

    assert!(matches!(restored.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn given_server_observer_when_set_offline_then_no_restore_event() {
    let connectivity = WatchConnectivity::server();
    let mut restored = connectivity.on_restored();

    connectivity.set_environment(Environment::Offline);

    assert!(matches!(restored.try_recv(), Err(TryRecvError::Empty)));
    assert_that!(connectivity.environment(), eq(Environment::Offline));
}

#[test]
fn given_server_observer_when_set_online_then_restore_event() {
    let connectivity = WatchConnectivity::server();
    let mut restored = connectivity.on_restored();

    connectivity.set_environment(Environment::Online);

    assert!(restored.try_recv().is_ok());
}

#[test]
fn given_receiver_subscribed_late_when_earlier_restore_then_not_seen() {
    let connectivity = WatchConnectivity::offline();
    connectivity.set_online(true);

    let mut restored = connectivity.on_restored();

    assert!(matches!(restored.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn given_subscriber_when_environment_changes_then_watch_updated() {
    // Given
    let connectivity = WatchConnectivity::online();
    let mut changes = connectivity.subscribe();

    // When
    let changed = connectivity.set_environment(Environment::Offline);
    let unchanged = connectivity.set_environment(Environment::Offline);

    // Then
    assert!(changed);
    assert!(!unchanged);
    assert!(changes.has_changed().unwrap());
    assert_that!(*changes.borrow_and_update(), eq(Environment::Offline));
}
