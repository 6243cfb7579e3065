use crate::{GeneratorError, LoadGenerator, LoadSpec};
use gale_report_model::MetricsSnapshot;
use hdrhistogram::Histogram;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-request timeout. Anything slower is counted as a timeout rather than
/// left to hold a connection for the rest of the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The bundled driver: `connections` tokio tasks, each issuing requests
/// back-to-back until the deadline, with per-request latency recorded into a
/// shared histogram.
pub struct HttpLoadGenerator {
    client: reqwest::Client,
}

#[derive(Default)]
struct Totals {
    requests: AtomicU64,
    errors: AtomicU64,
    non_2xx: AtomicU64,
    timeouts: AtomicU64,
    bytes_received: AtomicU64,
}

impl HttpLoadGenerator {
    pub fn new() -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl LoadGenerator for HttpLoadGenerator {
    async fn generate(&self, spec: &LoadSpec) -> Result<MetricsSnapshot, GeneratorError> {
        if spec.connections == 0 {
            return Err(GeneratorError::InvalidSpec(
                "connection count must be positive".to_string(),
            ));
        }
        if spec.duration.is_zero() {
            return Err(GeneratorError::InvalidSpec(
                "duration must be positive".to_string(),
            ));
        }

        // Microsecond resolution, up to 10 minutes per request.
        let histogram = Histogram::<u64>::new_with_bounds(1, 600_000_000, 3)
            .map_err(|e| GeneratorError::InvalidSpec(e.to_string()))?;
        let histogram = Arc::new(Mutex::new(histogram));
        let totals = Arc::new(Totals::default());

        let started = Instant::now();
        let deadline = started + spec.duration;

        let mut handles = Vec::with_capacity(spec.connections as usize);
        for _ in 0..spec.connections {
            let client = self.client.clone();
            let spec = spec.clone();
            let histogram = histogram.clone();
            let totals = totals.clone();

            handles.push(tokio::spawn(async move {
                while Instant::now() < deadline {
                    let mut request = client.request(spec.method.clone(), &spec.url);
                    for (name, value) in &spec.headers {
                        request = request.header(name, value);
                    }
                    if let Some(body) = &spec.body {
                        request = request.body(body.clone());
                    }

                    let sent_at = Instant::now();
                    totals.requests.fetch_add(1, Ordering::Relaxed);

                    match request.send().await {
                        Ok(response) => {
                            if !response.status().is_success() {
                                totals.non_2xx.fetch_add(1, Ordering::Relaxed);
                            }
                            match response.bytes().await {
                                Ok(body) => {
                                    totals
                                        .bytes_received
                                        .fetch_add(body.len() as u64, Ordering::Relaxed);
                                }
                                Err(e) => {
                                    log::debug!("Failed to read response body: {e}");
                                    totals.errors.fetch_add(1, Ordering::Relaxed);
                                }
                            }
                        }
                        Err(e) if e.is_timeout() => {
                            totals.timeouts.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            log::debug!("Request failed: {e}");
                            totals.errors.fetch_add(1, Ordering::Relaxed);
                        }
                    }

                    let elapsed_us = sent_at.elapsed().as_micros() as u64;
                    histogram.lock().saturating_record(elapsed_us.max(1));
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                log::error!("Connection task panicked: {e}");
            }
        }

        let elapsed_s = started.elapsed().as_secs_f64().max(f64::EPSILON);
        let histogram = histogram.lock();
        let requests = totals.requests.load(Ordering::Relaxed);

        let us_to_ms = |v: u64| v as f64 / 1000.0;
        Ok(MetricsSnapshot {
            requests,
            rps_mean: requests as f64 / elapsed_s,
            latency_mean_ms: histogram.mean() / 1000.0,
            latency_p50_ms: us_to_ms(histogram.value_at_quantile(0.50)),
            latency_p90_ms: us_to_ms(histogram.value_at_quantile(0.90)),
            latency_p95_ms: us_to_ms(histogram.value_at_quantile(0.95)),
            latency_p99_ms: us_to_ms(histogram.value_at_quantile(0.99)),
            latency_max_ms: us_to_ms(histogram.max()),
            throughput_mean_bps: totals.bytes_received.load(Ordering::Relaxed) as f64 / elapsed_s,
            errors: totals.errors.load(Ordering::Relaxed),
            non_2xx: totals.non_2xx.load(Ordering::Relaxed),
            timeouts: totals.timeouts.load(Ordering::Relaxed),
        })
    }
}
