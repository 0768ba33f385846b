use robot_remote::robot::{
    Command, Direction, RobotMode, RobotRequest, DEFAULT_REFRESH_DELAY, FETCH_FAILED_MESSAGE,
    SEND_FAILED_MESSAGE,
};
use std::sync::atomic::Ordering;
use std::time::Duration;

mod common;
use common::RecordingTransport;

// ---------------------------------------------------------------------------
// Refresh scheduling
// ---------------------------------------------------------------------------
#[tokio::test(start_paused = true)]
async fn test_dispatch_schedules_exactly_one_refresh_after_delay() {
    let transport = RecordingTransport::new();
    let client = transport.client();

    let refresh = client.dispatch(Command::SetMode(RobotMode::Follow)).await;

    tokio::time::sleep(DEFAULT_REFRESH_DELAY - Duration::from_millis(1)).await;
    assert_eq!(transport.status_polls(), 0, "refresh fired before the delay");

    refresh.await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, RobotRequest::Mode(3));
    assert_eq!(calls[1].0, RobotRequest::Status);
    assert!(calls[1].1 - calls[0].1 >= DEFAULT_REFRESH_DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_failed_dispatch_still_schedules_one_refresh() {
    let transport = RecordingTransport::new();
    transport.fail_commands.store(true, Ordering::SeqCst);
    let client = transport.client();

    client.dispatch(Command::Stop).await.await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(transport.status_polls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_refresh_delay_is_honoured() {
    let transport = RecordingTransport::new();
    let client = transport
        .client()
        .with_refresh_delay(Duration::from_millis(750));

    client.dispatch(Command::Stop).await.await.unwrap();

    let calls = transport.calls();
    let waited = calls[1].1 - calls[0].1;
    assert!(waited >= Duration::from_millis(750), "waited only {waited:?}");
    assert!(waited < Duration::from_millis(800), "waited {waited:?}");
}

#[tokio::test(start_paused = true)]
async fn test_each_dispatch_gets_its_own_refresh() {
    let transport = RecordingTransport::new();
    let client = transport.client();

    let moving = client.dispatch(Command::Move(Direction::Forward)).await;
    let stopping = client.dispatch(Command::Stop).await;
    moving.await.unwrap();
    stopping.await.unwrap();

    assert_eq!(
        transport.requests(),
        [
            RobotRequest::State("F".to_string()),
            RobotRequest::State("S".to_string()),
            RobotRequest::Status,
            RobotRequest::Status,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_dropping_refresh_handle_does_not_cancel_it() {
    let transport = RecordingTransport::new();
    let client = transport.client();

    drop(client.dispatch(Command::Stop).await);
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(transport.status_polls(), 1);
    assert!(client.state().status().is_some());
}

// ---------------------------------------------------------------------------
// Shared state updates
// ---------------------------------------------------------------------------
#[tokio::test(start_paused = true)]
async fn test_failed_send_does_not_touch_status() {
    let transport = RecordingTransport::new();
    let client = transport.client();

    client.refresh().await;
    let before = client.state().status();
    assert!(before.is_some());

    transport.fail_commands.store(true, Ordering::SeqCst);
    let refresh = client.dispatch(Command::Move(Direction::BackwardRight)).await;

    assert_eq!(client.state().status(), before);
    assert_eq!(client.state().error().as_deref(), Some(SEND_FAILED_MESSAGE));

    // The follow-up poll succeeds, which clears the send error
    refresh.await.unwrap();
    assert!(client.state().error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_repeated_failures_overwrite_the_same_error() {
    let transport = RecordingTransport::new();
    transport.fail_status.store(true, Ordering::SeqCst);
    let client = transport.client();

    client.refresh().await;
    client.refresh().await;
    assert_eq!(client.state().error().as_deref(), Some(FETCH_FAILED_MESSAGE));

    transport.fail_commands.store(true, Ordering::SeqCst);
    let _refresh = client.dispatch(Command::Stop).await;
    assert_eq!(client.state().error().as_deref(), Some(SEND_FAILED_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_never_see_status_with_stale_error() {
    let transport = RecordingTransport::new();
    let client = transport.client();
    let mut rx = client.state().subscribe();

    transport.fail_status.store(true, Ordering::SeqCst);
    client.refresh().await;
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().error.is_some());

    transport.fail_status.store(false, Ordering::SeqCst);
    client.refresh().await;
    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert!(snapshot.status.is_some());
    assert!(snapshot.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_staleness_tracks_last_successful_poll() {
    let transport = RecordingTransport::new();
    let client = transport.client();
    let max_age = chrono::Duration::minutes(5);

    assert!(client.state().is_stale(max_age));
    client.refresh().await;
    assert!(!client.state().is_stale(max_age));
    assert!(client.state().is_stale(chrono::Duration::zero()));
}

// ---------------------------------------------------------------------------
// Known gap: overlapping polls are not reconciled, the last to resolve wins
// ---------------------------------------------------------------------------
#[tokio::test(start_paused = true)]
async fn test_overlapping_refreshes_last_response_wins() {
    let transport = RecordingTransport::new();
    transport.push_status(
        Duration::from_millis(300),
        common::status_json(1, "slow, issued first"),
    );
    transport.push_status(
        Duration::from_millis(50),
        common::status_json(2, "fast, issued second"),
    );
    let client = transport.client();

    tokio::join!(client.refresh(), client.refresh());

    // The most recently issued poll does not necessarily determine the display
    let status = client.state().status().unwrap();
    assert_eq!(status.status, "slow, issued first");
    assert_eq!(status.mode, 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_dispatches_last_refresh_to_resolve_wins() {
    let transport = RecordingTransport::new();
    transport.push_status(
        Duration::from_millis(300),
        common::status_json(1, "Moving Forward"),
    );
    transport.push_status(Duration::from_millis(50), common::status_json(1, "Stopped"));
    let client = transport.client();

    let (moving, stopping) = tokio::join!(
        client.dispatch(Command::Move(Direction::Forward)),
        client.dispatch(Command::Stop),
    );
    moving.await.unwrap();
    stopping.await.unwrap();

    assert_eq!(
        transport.requests(),
        [
            RobotRequest::State("F".to_string()),
            RobotRequest::State("S".to_string()),
            RobotRequest::Status,
            RobotRequest::Status,
        ]
    );

    // Stop was issued last, yet the slower reply from the first poll is shown
    let status = client.state().status().unwrap();
    assert_eq!(status.status, "Moving Forward");
}
