use super::*;

fn authed_profile() -> Profile {
    Profile { id: Uuid::new_v4(), name: "Ada".into(), email: Some("ada@example.com".into()) }
}

// =============================================================================
// reducer
// =============================================================================

#[test]
fn default_model_is_uninitialized() {
    let model = AppModel::default();
    assert!(model.session_marker.is_none());
    assert!(model.profile.is_none());
    assert!(!model.app_ready);
    assert!(!model.flags_ready);
    assert_eq!(model.locale, "en");
}

#[test]
fn init_signals_set_ready_flags() {
    let mut model = AppModel::default();
    reduce(&mut model, &Signal::AppInit);
    assert!(model.app_ready);
    assert!(!model.flags_ready);
    reduce(&mut model, &Signal::FlagsInit);
    assert!(model.flags_ready);
}

#[test]
fn session_started_stores_marker() {
    let mut model = AppModel::default();
    let marker = Uuid::new_v4();
    reduce(&mut model, &Signal::SessionStarted { marker });
    assert_eq!(model.session_marker, Some(marker));
}

#[test]
fn profile_lifecycle_set_and_clear() {
    let mut model = AppModel::default();
    let profile = authed_profile();
    reduce(&mut model, &Signal::ProfileFetched { profile: profile.clone() });
    assert_eq!(model.profile, Some(profile.clone()));

    reduce(&mut model, &Signal::ProfileDeleted);
    assert!(model.profile.is_none());

    reduce(&mut model, &Signal::ProfileFetched { profile });
    reduce(&mut model, &Signal::LoggedOut);
    assert!(model.profile.is_none());
}

#[test]
fn locale_changed_updates_locale() {
    let mut model = AppModel::default();
    reduce(&mut model, &Signal::LocaleChanged { locale: "pt-br".into() });
    assert_eq!(model.locale, "pt-br");
}

#[test]
fn effect_only_signals_leave_model_untouched() {
    let mut model = AppModel::default();
    let before = model.clone();
    reduce(&mut model, &Signal::ProfileInit { profile: authed_profile() });
    reduce(&mut model, &Signal::ChannelMessage { payload: serde_json::json!({}) });
    reduce(&mut model, &Signal::error("x", "y"));
    assert_eq!(model, before);
}

// =============================================================================
// emit + fan-out
// =============================================================================

#[test]
fn emit_applies_reducer_and_snapshots() {
    let store = Store::new();
    store.emit([Signal::AppInit, Signal::FlagsInit]);
    let model = store.model();
    assert!(model.app_ready);
    assert!(model.flags_ready);
}

#[test]
fn subscriber_receives_signals_in_order() {
    let store = Store::new();
    let mut rx = store.subscribe();
    store.emit([Signal::AppInit, Signal::FlagsInit]);

    assert!(matches!(rx.try_recv(), Ok(Signal::AppInit)));
    assert!(matches!(rx.try_recv(), Ok(Signal::FlagsInit)));
    assert!(rx.try_recv().is_err());
}

#[test]
fn emissions_before_subscribe_are_not_replayed() {
    let store = Store::new();
    store.emit([Signal::AppInit]);
    let mut rx = store.subscribe();
    assert!(rx.try_recv().is_err());
}

#[test]
fn every_subscriber_sees_every_signal() {
    let store = Store::new();
    let mut a = store.subscribe();
    let mut b = store.subscribe();
    store.emit([Signal::ProfileDeleted]);

    assert!(matches!(a.try_recv(), Ok(Signal::ProfileDeleted)));
    assert!(matches!(b.try_recv(), Ok(Signal::ProfileDeleted)));
}

#[test]
fn closed_subscriber_is_pruned_on_emit() {
    let store = Store::new();
    let rx = store.subscribe();
    let _live = store.subscribe();
    assert_eq!(store.subscriber_count(), 2);

    drop(rx);
    store.emit([Signal::AppInit]);
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn full_subscriber_queue_drops_without_pruning() {
    let store = Store::new();
    let mut rx = store.subscribe();
    for _ in 0..300 {
        store.emit([Signal::AppInit]);
    }
    // Queue holds the first capacity's worth; the rest were dropped but the
    // subscriber survives.
    assert_eq!(store.subscriber_count(), 1);
    let mut received = 0usize;
    while rx.try_recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, SUBSCRIBER_QUEUE_CAPACITY);
}
