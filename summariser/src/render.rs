use crate::model::{AnalysisReport, DegradationReport, Report};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct BaselineRow {
    endpoint: String,
    #[tabled(display = "float2")]
    latency_mean_ms: f64,
    band: String,
    status: &'static str,
}

#[derive(Tabled)]
struct RankRow {
    rank: usize,
    endpoint: String,
    #[tabled(display = "float2")]
    latency_mean_ms: f64,
}

fn float2(n: &f64) -> String {
    format!("{:.2}", n)
}

fn modern(table: &mut Table) -> &mut Table {
    table.with(Style::modern())
}

/// Print the human-readable report to stdout.
pub fn print_report(report: &Report) {
    match report {
        Report::NoData => {
            println!("No run records found. Run a suite before analysing.");
        }
        Report::Analysis(report) => print_analysis(report),
    }
}

fn print_analysis(report: &AnalysisReport) {
    if !report.baseline.is_empty() {
        println!("\nBaseline runs");
        let rows: Vec<BaselineRow> = report
            .baseline
            .iter()
            .map(|entry| BaselineRow {
                endpoint: entry.endpoint.clone(),
                latency_mean_ms: entry.latency_mean_ms,
                band: entry.band.to_string(),
                status: if entry.clean { "no errors" } else { "errors" },
            })
            .collect();
        println!("{}", modern(&mut Table::new(rows)));
    }

    match &report.degradation {
        Some(DegradationReport::Degraded(point)) => {
            println!(
                "\nDegradation point: {} at {} connections ({:.2}ms mean latency)",
                point.endpoint, point.connections, point.latency_mean_ms
            );
            for reason in &point.reasons {
                println!("  - {reason}");
            }
        }
        Some(DegradationReport::HandledCleanly {
            scenario,
            connections,
        }) => {
            println!(
                "\nNo degradation detected; highest load level handled cleanly: {scenario} ({connections} connections)"
            );
        }
        None => {}
    }

    match &report.capacity {
        Some(capacity) => {
            println!(
                "\nMaximum safe capacity: {} connections; recommended operating limit: {}",
                capacity.max_safe_connections, capacity.recommended_limit
            );
        }
        None if report.degradation.is_some() => {
            println!("\nNo load level stayed within safe bounds; no capacity recommendation.");
        }
        None => {}
    }

    if let Some(endpoints) = &report.endpoints {
        println!("\nSlowest endpoints");
        let rows: Vec<RankRow> = endpoints
            .slowest
            .iter()
            .enumerate()
            .map(|(i, rank)| RankRow {
                rank: i + 1,
                endpoint: rank.endpoint.clone(),
                latency_mean_ms: rank.latency_mean_ms,
            })
            .collect();
        println!("{}", modern(&mut Table::new(rows)));

        println!("\nFastest endpoints");
        let rows: Vec<RankRow> = endpoints
            .fastest
            .iter()
            .enumerate()
            .map(|(i, rank)| RankRow {
                rank: i + 1,
                endpoint: rank.endpoint.clone(),
                latency_mean_ms: rank.latency_mean_ms,
            })
            .collect();
        println!("{}", modern(&mut Table::new(rows)));

        match endpoints.auth_overhead_ms {
            Some(overhead) => println!("\nAuth overhead: {overhead:.2}ms mean latency"),
            None => println!(
                "\nAuth overhead: insufficient data (needs both auth and non-auth records)"
            ),
        }
    }

    if report.health.is_good() {
        println!("\nOverall health: good");
    } else {
        println!("\nAdvisories");
        for advisory in report.health.advisories() {
            println!("  - {advisory}");
        }
    }
}
