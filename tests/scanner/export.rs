//! Exporting approved codes when a session stops

use scangate::app::startup::run;
use scangate::core::shutdown::ShutdownCoordinator;
use scangate::display::JsonRenderer;

use crate::common::{frame_log, json_lines, replay_settings};

#[tokio::test]
async fn test_export_written_at_stop() {
    let log = frame_log(&["QR1", "QR2", "QR1", "QR3"]);
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("approved.csv");
    let mut settings = replay_settings(log.path());
    settings.export = Some(export.clone());
    let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();
    let mut renderer = JsonRenderer::new(Vec::new());

    run(&settings, &mut renderer, shutdown_rx).await.unwrap();

    let lines = json_lines(&renderer.into_inner());
    let exported = lines.last().unwrap();
    assert_eq!(exported["event"], "exported");
    assert_eq!(exported["count"], 3);

    let csv = std::fs::read_to_string(&export).unwrap();
    let rows: Vec<Vec<&str>> = csv.lines().map(|l| l.split(',').collect()).collect();
    assert_eq!(rows[0], vec!["index", "code", "approved_at"]);
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[1][..2], &["1", "QR1"]);
    assert_eq!(&rows[2][..2], &["2", "QR2"]);
    assert_eq!(&rows[3][..2], &["3", "QR3"]);
    assert!(rows[1][2].ends_with('Z'));
}

#[tokio::test]
async fn test_tsv_export_and_empty_session() {
    let log = frame_log(&["", "!fail"]);
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("approved.tsv");
    let mut settings = replay_settings(log.path());
    settings.export = Some(export.clone());
    let (_coordinator, shutdown_rx) = ShutdownCoordinator::new();
    let mut renderer = JsonRenderer::new(Vec::new());

    let summary = run(&settings, &mut renderer, shutdown_rx).await.unwrap();

    assert_eq!(summary.stats.approved, 0);
    let tsv = std::fs::read_to_string(&export).unwrap();
    assert_eq!(tsv.trim_end(), "index\tcode\tapproved_at");
}
