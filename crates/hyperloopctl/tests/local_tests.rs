//! End-to-end checks of the client against an in-process session.

use hyperloop_common::{DashboardQuery, PodStatus, SortKey, StatusFilter};
use hyperloopctl::commands;
use hyperloopctl::dashboard::DashboardState;
use hyperloopctl::source::FrameSource;

#[tokio::test]
async fn test_status_then_compare_locally() {
    let mut source = FrameSource::local(Some(11));
    let query = DashboardQuery::default().with_sort(SortKey::Battery);

    commands::status(&mut source, &query).await.unwrap();
    commands::compare(&mut source, "Avishkar-1", "Avishkar-2")
        .await
        .unwrap();

    // compare does not advance the simulation
    let frame = source.next_frame(&query).await.unwrap();
    assert_eq!(frame.cycle, 2);
    source.close().await.unwrap();
}

#[tokio::test]
async fn test_compare_unknown_pod_fails() {
    let mut source = FrameSource::local(Some(11));
    assert!(commands::compare(&mut source, "Avishkar-1", "Avishkar-9")
        .await
        .is_err());
}

#[tokio::test]
async fn test_filtered_rows_match_status() {
    let mut source = FrameSource::local(Some(5));
    let query = DashboardQuery::default()
        .with_filter(StatusFilter::Only(PodStatus::Operational));

    for _ in 0..5 {
        let frame = source.next_frame(&query).await.unwrap();
        assert!(frame
            .tracker
            .rows
            .iter()
            .all(|pod| pod.status == PodStatus::Operational));
    }
}

#[tokio::test]
async fn test_dashboard_state_follows_frames() {
    let mut source = FrameSource::local(Some(8));
    let mut state = DashboardState::new(source.describe());

    let frame = source.next_frame(&state.query).await.unwrap();
    state.apply_frame(frame);

    let current = state.frame.as_ref().unwrap();
    assert_eq!(current.cycle, 1);
    assert_eq!(current.pod_names.len(), 3);
}
