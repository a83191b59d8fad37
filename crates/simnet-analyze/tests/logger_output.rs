//! Analyze a log produced by the real cycle runner.

use std::time::Duration;

use simnet_analyze::{analyze, load, render_charts, summarize, AnalyzeError, DEFAULT_CHARTS};
use simnet_sim::draw::SeededDraw;
use simnet_sim::interface::Registry;
use simnet_sim::report::StatusReporter;
use simnet_sim::runner::CycleRunner;
use simnet_sim::sink::CsvSink;
use simnet_sim::test_util::FixedClock;

#[test]
fn analyzes_runner_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simnet_data.csv");

    let mut runner = CycleRunner::new(
        Registry::standard(),
        SeededDraw::new(21),
        FixedClock::new(13, 1_700_000_000),
        CsvSink::create(&path).unwrap(),
        StatusReporter::new(Vec::new()),
        Duration::from_secs(5),
    )
    .with_max_cycles(Some(6));
    runner.run();
    let final_state = runner.registry().clone();
    runner.finish(Some(&path)).unwrap();

    let rows = load(&path).unwrap();
    assert_eq!(rows.len(), 18);

    let reports = analyze(&rows);
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["eth0", "wlan0", "lo"]);
    for r in &reports {
        let iface = final_state.get(&r.name).unwrap();
        assert_eq!(r.rx_bytes, iface.rx_bytes);
        assert_eq!(r.tx_errors, iface.tx_errors);
    }

    let s = summarize(&rows);
    assert_eq!(s.cycles, 6);
    assert_eq!(s.interfaces, 3);
    // wlan0 starts with the most traffic and two receive errors.
    assert!(s.total_errors >= 3);
    assert!(!s.busiest.is_empty());
}

#[test]
fn charts_runner_log_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("simnet_data.csv");

    let mut runner = CycleRunner::new(
        Registry::standard(),
        SeededDraw::new(4),
        FixedClock::new(10, 1_700_000_000),
        CsvSink::create(&log).unwrap(),
        StatusReporter::new(Vec::new()),
        Duration::from_secs(5),
    )
    .with_max_cycles(Some(5));
    runner.run();
    runner.finish(Some(&log)).unwrap();

    let png = dir.path().join(DEFAULT_CHARTS);
    render_charts(&load(&log).unwrap(), &png).unwrap();
    assert!(png.exists());
    assert!(std::fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn missing_log_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("simnet_data.csv")).unwrap_err();
    assert!(matches!(err, AnalyzeError::NotFound(_)));
    assert!(err.to_string().ends_with("simnet_data.csv not found"));
}

#[test]
fn malformed_log_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(
        &path,
        "timestamp,cycle,interface,rx_bytes,tx_bytes,rx_packets,tx_packets,rx_errors,tx_errors,status,link_speed\n\
         1,1,eth0,not-a-number,0,0,0,0,0,1,1000.0\n",
    )
    .unwrap();
    assert!(matches!(load(&path).unwrap_err(), AnalyzeError::Csv(_)));
}
