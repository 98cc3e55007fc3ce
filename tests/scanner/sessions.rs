//! Session behaviour through the public scanner API

use std::sync::Arc;
use std::time::{Duration, Instant};

use scangate::core::shutdown::ShutdownCoordinator;
use scangate::core::time::ManualClock;
use scangate::display::JsonRenderer;
use scangate::scanner::api::{
    run_scan, Command, ControllerConfig, Notice, PollingTask, ScanController, ScanResult,
    ScriptedSource, SharedDeduplicator,
};

fn controller(cooldown: Duration) -> ScanController {
    ScanController::with_clock(
        ControllerConfig {
            cooldown,
            export_path: None,
        },
        Arc::new(ManualClock::new()),
    )
}

#[tokio::test]
async fn test_each_session_starts_empty() {
    let mut controller = controller(Duration::ZERO);
    let task = PollingTask::new(Duration::from_millis(1)).unwrap();

    for _ in 0..2 {
        let mut source = ScriptedSource::from_codes(["QR1", "QR1"]);
        let mut renderer = JsonRenderer::new(Vec::new());
        let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();

        let summary = run_scan(&mut source, &mut controller, &mut renderer, &task, shutdown_rx)
            .await
            .unwrap();

        assert_eq!(summary.stats.approved, 1);
        assert_eq!(summary.stats.rejected, 1);
    }
}

#[test]
fn test_frames_while_stopped_are_ignored() {
    let mut controller = controller(Duration::ZERO);
    assert!(controller
        .dispatch(Command::Frame(vec!["QR1".to_string()]))
        .is_empty());

    controller.dispatch(Command::Start);
    let notices = controller.dispatch(Command::Frame(vec!["QR1".to_string()]));
    assert_eq!(
        notices,
        vec![Notice::Result {
            result: ScanResult::approved("QR1")
        }]
    );
}

#[tokio::test]
async fn test_shared_deduplicator_approves_once_across_tasks() {
    let shared = SharedDeduplicator::new();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let dedup = shared.clone();
        handles.push(tokio::spawn(async move {
            (0..50)
                .map(|i| dedup.process(&format!("QR{}", i % 10), Instant::now()))
                .filter(ScanResult::is_approved)
                .count()
        }));
    }

    let mut approved = 0;
    for handle in handles {
        approved += handle.await.unwrap();
    }
    assert_eq!(approved, 10);
    assert_eq!(shared.approved_count(), 10);
}
