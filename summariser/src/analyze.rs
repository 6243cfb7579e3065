use crate::model::{
    AnalysisReport, BaselineEntry, CapacityRecommendation, DegradationPoint, DegradationReport,
    EndpointComparisonReport, EndpointRank, HealthAdvisory, LatencyBand, Report,
};
use gale_report_model::{ResultsArchive, RunRecord};
use itertools::Itertools;
use std::cmp::Ordering;

const DEGRADED_MEAN_MS: f64 = 500.0;
const DEGRADED_INCREASE_PCT: f64 = 50.0;
const SAFE_P99_MS: f64 = 1000.0;
const CAPACITY_DERATE: f64 = 0.7;
const RANKED_COUNT: usize = 3;

/// Analyze a freshly loaded archive into a report.
pub fn analyze(archive: &ResultsArchive) -> Report {
    if archive.is_empty() {
        return Report::NoData;
    }

    Report::Analysis(AnalysisReport {
        generated_at: chrono::Utc::now(),
        baseline: baseline_summary(&archive.baseline),
        degradation: degradation_report(&archive.progressive),
        capacity: capacity_recommendation(&archive.progressive),
        endpoints: endpoint_comparison(&archive.endpoint_comparison),
        health: health_advisory(archive),
    })
}

fn baseline_summary(records: &[RunRecord]) -> Vec<BaselineEntry> {
    records
        .iter()
        .map(|record| BaselineEntry {
            scenario: record.scenario.clone(),
            endpoint: record.endpoint.clone(),
            latency_mean_ms: record.metrics.latency_mean_ms,
            band: LatencyBand::for_mean_ms(record.metrics.latency_mean_ms),
            clean: record.metrics.is_clean(),
        })
        .collect()
}

fn degradation_report(records: &[RunRecord]) -> Option<DegradationReport> {
    if records.is_empty() {
        return None;
    }

    if let Some(point) = detect_degradation(records) {
        return Some(DegradationReport::Degraded(point));
    }

    let highest = records.iter().max_by_key(|r| r.connections)?;
    Some(DegradationReport::HandledCleanly {
        scenario: highest.scenario.clone(),
        connections: highest.connections,
    })
}

/// Pairwise scan of the stored (load-ascending) sequence. Stops at the first
/// violating record, never a later one, even when a later record violates
/// more severely.
///
/// The comparison is positional: each record is compared against the one
/// stored before it. In a multi-endpoint matrix the pair at an endpoint
/// boundary is not comparable, so the percentage check is skipped there (with
/// a warning) and only the absolute thresholds apply.
fn detect_degradation(records: &[RunRecord]) -> Option<DegradationPoint> {
    for (prev, curr) in records.iter().tuple_windows() {
        let mut reasons = Vec::new();
        let mut increase_pct = None;

        if prev.endpoint == curr.endpoint {
            if prev.metrics.latency_mean_ms > 0.0 {
                let pct = (curr.metrics.latency_mean_ms - prev.metrics.latency_mean_ms)
                    / prev.metrics.latency_mean_ms
                    * 100.0;
                increase_pct = Some(pct);
                if pct > DEGRADED_INCREASE_PCT {
                    reasons.push(format!(
                        "mean latency rose {pct:.0}% over the previous load level"
                    ));
                }
            }
        } else {
            log::warn!(
                "Degradation scan crossed an endpoint boundary ({} -> {}); \
                 skipping the pairwise latency comparison",
                prev.endpoint,
                curr.endpoint
            );
        }

        if curr.metrics.latency_mean_ms > DEGRADED_MEAN_MS {
            reasons.push(format!("mean latency above {DEGRADED_MEAN_MS:.0}ms"));
        }
        if !curr.metrics.is_clean() {
            reasons.push(format!(
                "{} errors and {} non-2xx responses observed",
                curr.metrics.errors, curr.metrics.non_2xx
            ));
        }

        if !reasons.is_empty() {
            return Some(DegradationPoint {
                scenario: curr.scenario.clone(),
                endpoint: curr.endpoint.clone(),
                connections: curr.connections,
                latency_mean_ms: curr.metrics.latency_mean_ms,
                increase_pct,
                reasons,
            });
        }
    }

    None
}

/// Highest connection count that stayed within latency and error bounds,
/// derated to a recommended operating limit.
fn capacity_recommendation(records: &[RunRecord]) -> Option<CapacityRecommendation> {
    let max_safe_connections = records
        .iter()
        .filter(|r| {
            r.metrics.latency_mean_ms < DEGRADED_MEAN_MS
                && r.metrics.latency_p99_ms < SAFE_P99_MS
                && r.metrics.is_clean()
        })
        .map(|r| r.connections)
        .max()?;

    Some(CapacityRecommendation {
        max_safe_connections,
        recommended_limit: (max_safe_connections as f64 * CAPACITY_DERATE).floor() as u32,
    })
}

fn endpoint_comparison(records: &[RunRecord]) -> Option<EndpointComparisonReport> {
    if records.is_empty() {
        return None;
    }

    let rank = |record: &RunRecord| EndpointRank {
        endpoint: record.endpoint.clone(),
        latency_mean_ms: record.metrics.latency_mean_ms,
    };

    // Stable sorts, so ties keep their stored order.
    let mut by_descending: Vec<&RunRecord> = records.iter().collect();
    by_descending.sort_by(|a, b| {
        b.metrics
            .latency_mean_ms
            .partial_cmp(&a.metrics.latency_mean_ms)
            .unwrap_or(Ordering::Equal)
    });

    let mut by_ascending: Vec<&RunRecord> = records.iter().collect();
    by_ascending.sort_by(|a, b| {
        a.metrics
            .latency_mean_ms
            .partial_cmp(&b.metrics.latency_mean_ms)
            .unwrap_or(Ordering::Equal)
    });

    let (auth, anonymous): (Vec<&RunRecord>, Vec<&RunRecord>) =
        records.iter().partition(|r| r.requires_auth);
    let auth_overhead_ms = if auth.is_empty() || anonymous.is_empty() {
        None
    } else {
        let avg = |group: &[&RunRecord]| {
            group.iter().map(|r| r.metrics.latency_mean_ms).sum::<f64>() / group.len() as f64
        };
        Some(avg(&auth) - avg(&anonymous))
    };

    Some(EndpointComparisonReport {
        slowest: by_descending.iter().take(RANKED_COUNT).map(|r| rank(r)).collect(),
        fastest: by_ascending.iter().take(RANKED_COUNT).map(|r| rank(r)).collect(),
        auth_overhead_ms,
    })
}

fn health_advisory(archive: &ResultsArchive) -> HealthAdvisory {
    let mut health = HealthAdvisory::default();
    for record in archive.all_records() {
        health.high_latency |= record.metrics.latency_mean_ms > DEGRADED_MEAN_MS;
        health.errors_present |= !record.metrics.is_clean();
        health.high_p99 |= record.metrics.latency_p99_ms > SAFE_P99_MS;
    }
    health
}
