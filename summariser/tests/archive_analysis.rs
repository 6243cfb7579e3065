use gale_report_model::{
    write_run_records, MetricsSnapshot, ResultsArchive, RunCategory, RunRecord,
};
use gale_summariser::analyze;
use gale_summariser::model::{DegradationReport, Report};

fn record(category: RunCategory, connections: u32, mean_ms: f64) -> RunRecord {
    RunRecord {
        scenario: format!("{connections}-connections"),
        endpoint: "GET /api/articles".to_string(),
        connections,
        duration_s: 10,
        category,
        requires_auth: false,
        metrics: MetricsSnapshot {
            requests: 1000,
            rps_mean: 100.0,
            latency_mean_ms: mean_ms,
            latency_p50_ms: mean_ms,
            latency_p90_ms: mean_ms * 1.4,
            latency_p95_ms: mean_ms * 1.5,
            latency_p99_ms: mean_ms * 2.0,
            latency_max_ms: mean_ms * 3.0,
            throughput_mean_bps: 100_000.0,
            errors: 0,
            non_2xx: 0,
            timeouts: 0,
        },
    }
}

#[test]
fn persisted_progressive_ladder_is_analysed_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let ladder: Vec<RunRecord> = [
        (10, 20.0),
        (50, 26.0),
        (100, 33.0),
        (250, 600.0),
        (500, 900.0),
    ]
    .iter()
    .map(|&(connections, mean)| record(RunCategory::Progressive, connections, mean))
    .collect();
    write_run_records(
        &dir.path().join("progressive-2026-08-28T10-00-00-000Z.json"),
        &ladder,
    )
    .unwrap();
    // A malformed file alongside must not block the analysis.
    std::fs::write(dir.path().join("baseline-broken.json"), "{oops").unwrap();

    let archive = ResultsArchive::load(dir.path()).unwrap();
    let Report::Analysis(report) = analyze(&archive) else {
        panic!("Expected an analysis report");
    };

    let Some(DegradationReport::Degraded(point)) = report.degradation else {
        panic!("Expected a degradation point");
    };
    assert_eq!(point.connections, 250);

    let capacity = report.capacity.unwrap();
    assert_eq!(capacity.max_safe_connections, 100);
    assert_eq!(capacity.recommended_limit, 70);

    // 600ms and 900ms means with 1200ms+ p99s trip both latency advisories.
    assert!(report.health.high_latency);
    assert!(report.health.high_p99);
    assert!(!report.health.errors_present);
}

#[test]
fn empty_store_yields_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let archive = ResultsArchive::load(dir.path()).unwrap();
    assert_eq!(analyze(&archive), Report::NoData);
}
