//! Replaying frame logs through the whole scan loop

use std::time::Duration;

use scangate::app::startup::run;
use scangate::core::shutdown::ShutdownCoordinator;
use scangate::display::{JsonRenderer, TextRenderer};
use scangate::scanner::polling::StopReason;
use scangate::scanner::ScanError;

use crate::common::{frame_log, json_lines, messages, replay_settings};

#[tokio::test]
async fn test_repeated_codes_are_rejected() {
    let log = frame_log(&["QR1", "QR2", "QR1", "QR3", "QR2"]);
    let settings = replay_settings(log.path());
    let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();
    let mut renderer = JsonRenderer::new(Vec::new());

    let summary = run(&settings, &mut renderer, shutdown_rx).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::Completed);
    assert_eq!(summary.stats.approved, 3);
    assert_eq!(summary.stats.rejected, 2);
    assert_eq!(summary.stats.frames, 5);

    let lines = json_lines(&renderer.into_inner());
    let results: Vec<(&str, &str)> = lines
        .iter()
        .filter(|v| v["event"] == "result")
        .map(|v| {
            (
                v["result"].as_str().unwrap(),
                v["code"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        results,
        vec![
            ("approved", "QR1"),
            ("approved", "QR2"),
            ("rejected", "QR1"),
            ("approved", "QR3"),
            ("rejected", "QR2"),
        ]
    );
    assert_eq!(lines.first().unwrap()["status"], "scanning");
    assert_eq!(lines.last().unwrap()["status"], "stopped");
}

#[tokio::test]
async fn test_multiple_codes_in_one_frame_and_failures() {
    let log = frame_log(&[
        "# two codes, then a failed read, then an empty frame",
        "A\tB",
        "!fail",
        "",
        "A",
    ]);
    let settings = replay_settings(log.path());
    let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();
    let mut renderer = TextRenderer::new(Vec::new(), false);

    let summary = run(&settings, &mut renderer, shutdown_rx).await.unwrap();

    assert_eq!(summary.stats.failed_frames, 1);
    assert_eq!(summary.stats.approved, 2);
    assert_eq!(summary.stats.rejected, 1);

    let text = String::from_utf8(renderer.into_inner()).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "Scanning...",
            "Approved: A",
            "Approved: B",
            "Failed to capture frame.",
            "This code has already been used.",
            "Scanning stopped.",
        ]
    );
}

#[tokio::test]
async fn test_cooldown_suppresses_repeats_without_changing_results() {
    let log = frame_log(&["QR1", "QR1", "QR1"]);
    let mut settings = replay_settings(log.path());
    settings.cooldown = Duration::from_secs(60);
    let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();
    let mut renderer = JsonRenderer::new(Vec::new());

    let summary = run(&settings, &mut renderer, shutdown_rx).await.unwrap();

    assert_eq!(summary.stats.approved, 1);
    assert_eq!(summary.stats.suppressed, 2);
    assert_eq!(
        messages(&renderer.into_inner()),
        vec!["Scanning...", "Approved: QR1", "Scanning stopped."]
    );
}

#[tokio::test]
async fn test_shutdown_stops_session() {
    let log = frame_log(&["QR1"; 50]);
    let mut settings = replay_settings(log.path());
    settings.interval = Duration::from_secs(3600);
    let (coordinator, shutdown_rx) = ShutdownCoordinator::new();
    coordinator.trigger_shutdown();
    let mut renderer = JsonRenderer::new(Vec::new());

    let summary = run(&settings, &mut renderer, shutdown_rx).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::Shutdown);
    let output = messages(&renderer.into_inner());
    assert_eq!(output.last().map(String::as_str), Some("Scanning stopped."));
}

#[tokio::test]
async fn test_missing_frame_log_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let settings = replay_settings(&dir.path().join("missing.log"));
    let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();
    let mut renderer = JsonRenderer::new(Vec::new());

    let err = run(&settings, &mut renderer, shutdown_rx).await.unwrap_err();
    assert!(matches!(err, ScanError::SourceUnavailable { .. }));
    assert!(renderer.into_inner().is_empty());
}
