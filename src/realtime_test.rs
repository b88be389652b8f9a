use super::*;

// =============================================================================
// backoff
// =============================================================================

#[test]
fn backoff_first_attempt_stays_near_base() {
    let base = Duration::from_millis(250);
    let cap = Duration::from_millis(15_000);
    for _ in 0..32 {
        let d = backoff_delay(0, base, cap);
        assert!(d >= base);
        assert!(d <= base + base / 4);
    }
}

#[test]
fn backoff_grows_with_attempts() {
    let base = Duration::from_millis(250);
    let cap = Duration::from_millis(15_000);
    let early = backoff_delay(0, base, cap);
    let later = backoff_delay(4, base, cap);
    assert!(later >= early);
}

#[test]
fn backoff_is_capped_with_bounded_jitter() {
    let base = Duration::from_millis(250);
    let cap = Duration::from_millis(15_000);
    for attempt in [10, 16, 1000, u32::MAX] {
        let d = backoff_delay(attempt, base, cap);
        assert!(d >= cap);
        assert!(d <= cap + cap / 4);
    }
}

#[test]
fn backoff_zero_jitter_band_returns_capped() {
    let base = Duration::from_millis(1);
    let cap = Duration::from_millis(2);
    assert_eq!(backoff_delay(0, base, cap), Duration::from_millis(1));
}

// =============================================================================
// payload parsing
// =============================================================================

#[test]
fn parse_accepts_json_objects() {
    let payload = parse_channel_message(r#"{"type":"presence"}"#).unwrap();
    assert_eq!(payload["type"], "presence");
}

#[test]
fn parse_rejects_non_objects() {
    assert!(parse_channel_message("[1,2,3]").is_none());
    assert!(parse_channel_message("42").is_none());
    assert!(parse_channel_message(r#""text""#).is_none());
}

#[test]
fn parse_rejects_malformed_json() {
    assert!(parse_channel_message("{not json").is_none());
    assert!(parse_channel_message("").is_none());
}

// =============================================================================
// initialize
// =============================================================================

#[tokio::test]
async fn initialize_rejects_non_websocket_url() {
    let store = Arc::new(Store::new());
    let channel = WsChannel::new(ChannelConfig::new("http://example.com"), store);
    let err = channel.initialize().await.unwrap_err();
    assert!(matches!(err, RealtimeError::InvalidUrl(_)));
}

#[tokio::test]
async fn initialize_is_single_shot() {
    let store = Arc::new(Store::new());
    // Nothing listens on this port; the supervisor just cycles reconnects
    // until the channel is dropped at the end of the test.
    let channel = WsChannel::new(ChannelConfig::new("ws://127.0.0.1:9"), store);
    channel.initialize().await.unwrap();

    let err = channel.initialize().await.unwrap_err();
    assert!(matches!(err, RealtimeError::AlreadyInitialized));
}
