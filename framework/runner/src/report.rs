use gale_report_model::RunRecord;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    scenario: String,
    endpoint: String,
    connections: u32,
    #[tabled(display = "float2")]
    rps: f64,
    #[tabled(display = "float2")]
    latency_mean_ms: f64,
    #[tabled(display = "float2")]
    latency_p95_ms: f64,
    #[tabled(display = "float2")]
    latency_p99_ms: f64,
    errors: u64,
}

fn float2(n: &f64) -> String {
    format!("{:.2}", n)
}

/// Print the end-of-suite comparison table, ordered per the matrix.
pub(crate) fn print_suite_summary(name: &str, records: &[RunRecord]) {
    if records.is_empty() {
        println!("\nNo cells completed for suite {name}");
        return;
    }

    println!("\nSummary for suite {name}");
    let rows = records
        .iter()
        .map(|record| SummaryRow {
            scenario: record.scenario.clone(),
            endpoint: record.endpoint.clone(),
            connections: record.connections,
            rps: record.metrics.rps_mean,
            latency_mean_ms: record.metrics.latency_mean_ms,
            latency_p95_ms: record.metrics.latency_p95_ms,
            latency_p99_ms: record.metrics.latency_p99_ms,
            errors: record.metrics.errors + record.metrics.non_2xx,
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(rows);
    table.with(Style::modern());

    println!("{table}");
}
