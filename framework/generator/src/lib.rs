mod http;

pub use http::HttpLoadGenerator;

use gale_report_model::MetricsSnapshot;
use std::time::Duration;

/// Input for one load generator invocation.
#[derive(Debug, Clone)]
pub struct LoadSpec {
    pub url: String,
    pub method: reqwest::Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub connections: u32,
    pub duration: Duration,
    /// Accepted for interface parity with pipelining generators. The bundled
    /// driver issues one request at a time per connection and ignores it.
    pub pipelining: Option<u32>,
}

impl LoadSpec {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: reqwest::Method::GET,
            headers: Vec::new(),
            body: None,
            connections: 1,
            duration: Duration::from_secs(10),
            pipelining: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("invalid load spec: {0}")]
    InvalidSpec(String),
    #[error("transport failure driving load")]
    Transport(#[from] reqwest::Error),
}

/// The one capability the orchestrator consumes: drive real concurrent
/// connections against a target and hand back a single aggregate snapshot.
///
/// One `generate` call is one atomic suspension point for the caller. The
/// orchestrator never has two invocations in flight, so implementations are
/// free to use the whole machine.
#[async_trait::async_trait]
pub trait LoadGenerator: Send + Sync {
    async fn generate(&self, spec: &LoadSpec) -> Result<MetricsSnapshot, GeneratorError>;
}
