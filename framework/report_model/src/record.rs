use serde::{Deserialize, Serialize};

/// Aggregate result of one load generator run.
///
/// Produced once by the generator and never mutated. Latency values are in
/// milliseconds and may carry fractional precision, which must survive
/// serialization. For any well-formed snapshot `p50 <= p95 <= p99 <= max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total number of requests issued during the run
    pub requests: u64,
    /// Average requests per second over the run
    pub rps_mean: f64,
    pub latency_mean_ms: f64,
    pub latency_p50_ms: f64,
    /// Not part of the original persisted shape, so absent in older files.
    /// Carried because the latency gate thresholds are defined on p90.
    #[serde(default)]
    pub latency_p90_ms: f64,
    pub latency_p95_ms: f64,
    pub latency_p99_ms: f64,
    pub latency_max_ms: f64,
    /// Average response throughput in bytes per second
    pub throughput_mean_bps: f64,
    /// Transport-level failures (connection reset, refused, ...)
    pub errors: u64,
    /// Responses received with a non-2xx status
    pub non_2xx: u64,
    pub timeouts: u64,
}

impl MetricsSnapshot {
    /// True when the run saw neither transport errors nor non-2xx responses.
    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.non_2xx == 0
    }
}

/// The run-group a record belongs to. Each persisted file holds records of
/// exactly one category, and the category is recoverable from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunCategory {
    Baseline,
    Progressive,
    EndpointComparison,
}

impl RunCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunCategory::Baseline => "baseline",
            RunCategory::Progressive => "progressive",
            RunCategory::EndpointComparison => "endpoint-comparison",
        }
    }

    /// Infer the category from a result file name by substring match.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.contains("baseline") {
            Some(RunCategory::Baseline)
        } else if name.contains("progressive") {
            Some(RunCategory::Progressive)
        } else if name.contains("endpoint") {
            Some(RunCategory::EndpointComparison)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RunCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one (scenario, endpoint) cell.
///
/// Created by the orchestrator immediately after the generator returns and
/// never mutated afterwards. Within a persisted file, records keep the order
/// they were generated in, which the degradation scan relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub scenario: String,
    pub endpoint: String,
    pub connections: u32,
    pub duration_s: u64,
    pub category: RunCategory,
    /// Whether the endpoint needed a bearer token. Lets the analyzer compare
    /// authenticated against anonymous latency without re-reading the matrix.
    #[serde(default)]
    pub requires_auth: bool,
    pub metrics: MetricsSnapshot,
}
