use serde::{Deserialize, Serialize};

/// Mean-latency classification for baseline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyBand {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl LatencyBand {
    pub fn for_mean_ms(mean_ms: f64) -> Self {
        if mean_ms < 50.0 {
            LatencyBand::Excellent
        } else if mean_ms < 100.0 {
            LatencyBand::Good
        } else if mean_ms < 200.0 {
            LatencyBand::Acceptable
        } else {
            LatencyBand::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LatencyBand::Excellent => "excellent",
            LatencyBand::Good => "good",
            LatencyBand::Acceptable => "acceptable",
            LatencyBand::Poor => "poor",
        }
    }
}

impl std::fmt::Display for LatencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineEntry {
    pub scenario: String,
    pub endpoint: String,
    pub latency_mean_ms: f64,
    pub band: LatencyBand,
    /// No transport errors and no non-2xx responses
    pub clean: bool,
}

/// The first cell, in load-ascending order, that crossed a regression
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationPoint {
    pub scenario: String,
    pub endpoint: String,
    pub connections: u32,
    pub latency_mean_ms: f64,
    /// Percentage increase over the previous load level, when the previous
    /// record was comparable (same endpoint, nonzero latency).
    pub increase_pct: Option<f64>,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DegradationReport {
    Degraded(DegradationPoint),
    /// All load levels passed; the suite handled the highest scenario cleanly.
    HandledCleanly { scenario: String, connections: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRecommendation {
    /// Highest connection count whose record stayed within latency and error
    /// bounds
    pub max_safe_connections: u32,
    /// 70%-derated operating limit
    pub recommended_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointRank {
    pub endpoint: String,
    pub latency_mean_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointComparisonReport {
    pub slowest: Vec<EndpointRank>,
    pub fastest: Vec<EndpointRank>,
    /// `avg(auth mean latency) - avg(non-auth mean latency)`; omitted when
    /// either group is empty
    pub auth_overhead_ms: Option<f64>,
}

/// Cross-category health flags with a fixed advisory per flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthAdvisory {
    pub high_latency: bool,
    pub errors_present: bool,
    pub high_p99: bool,
}

impl HealthAdvisory {
    pub fn is_good(&self) -> bool {
        !(self.high_latency || self.errors_present || self.high_p99)
    }

    pub fn advisories(&self) -> Vec<&'static str> {
        let mut advisories = Vec::new();
        if self.high_latency {
            advisories
                .push("Mean latency exceeded 500ms; review slow queries, indexing and caching");
        }
        if self.errors_present {
            advisories
                .push("Errors observed under load; tune connection pooling and add rate limiting");
        }
        if self.high_p99 {
            advisories.push(
                "p99 latency exceeded 1000ms; harden retries, timeouts and circuit breakers",
            );
        }
        advisories
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub baseline: Vec<BaselineEntry>,
    pub degradation: Option<DegradationReport>,
    pub capacity: Option<CapacityRecommendation>,
    pub endpoints: Option<EndpointComparisonReport>,
    pub health: HealthAdvisory,
}

/// Analysis outcome. An empty archive is reported, not treated as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    NoData,
    Analysis(AnalysisReport),
}
