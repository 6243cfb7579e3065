use gale_runner::prelude::*;
use std::time::Duration;

/// CI gate thresholds. Breaching either fails the pipeline.
const P90_LIMIT_MS: f64 = 150.0;
const P99_LIMIT_MS: f64 = 300.0;

const GATE_ENDPOINT: &str = "/api/articles?limit=20";
const GATE_CONNECTIONS: u32 = 10;
const GATE_DURATION_S: u64 = 10;

fn thresholds_breached(snapshot: &MetricsSnapshot) -> bool {
    snapshot.latency_p90_ms > P90_LIMIT_MS || snapshot.latency_p99_ms > P99_LIMIT_MS
}

/// One fixed load run; exit 1 when the latency gate is breached so an
/// external CI pipeline fails. This is the one place failure escalates
/// instead of being absorbed.
fn main() -> GaleResult<()> {
    let cli = init();
    let base_url = resolve_target(&cli);

    let mut spec = LoadSpec::get(format!("{base_url}{GATE_ENDPOINT}"));
    spec.connections = GATE_CONNECTIONS;
    spec.duration = Duration::from_secs(cli.duration.unwrap_or(GATE_DURATION_S));

    let generator = HttpLoadGenerator::new()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let snapshot = runtime.block_on(generator.generate(&spec))?;

    println!(
        "p90 latency: {:.2}ms (limit {:.0}ms)",
        snapshot.latency_p90_ms, P90_LIMIT_MS
    );
    println!(
        "p99 latency: {:.2}ms (limit {:.0}ms)",
        snapshot.latency_p99_ms, P99_LIMIT_MS
    );

    if thresholds_breached(&snapshot) {
        eprintln!("Latency gate failed");
        std::process::exit(1);
    }

    println!("Latency gate passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(p90_ms: f64, p99_ms: f64) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: 1000,
            rps_mean: 100.0,
            latency_mean_ms: p90_ms / 2.0,
            latency_p50_ms: p90_ms / 2.0,
            latency_p90_ms: p90_ms,
            latency_p95_ms: p90_ms,
            latency_p99_ms: p99_ms,
            latency_max_ms: p99_ms * 2.0,
            throughput_mean_bps: 100_000.0,
            errors: 0,
            non_2xx: 0,
            timeouts: 0,
        }
    }

    #[test]
    fn within_both_limits_passes() {
        assert!(!thresholds_breached(&snapshot(140.0, 290.0)));
    }

    #[test]
    fn p90_breach_fails() {
        assert!(thresholds_breached(&snapshot(160.0, 290.0)));
    }

    #[test]
    fn p99_breach_fails() {
        assert!(thresholds_breached(&snapshot(140.0, 310.0)));
    }
}
