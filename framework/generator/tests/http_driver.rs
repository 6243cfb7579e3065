use gale_generator::{GeneratorError, HttpLoadGenerator, LoadGenerator, LoadSpec};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal fixed-response HTTP server for driving the generator against.
async fn spawn_server(status_line: &'static str) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok"
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    Ok(format!("http://{addr}/"))
}

#[tokio::test(flavor = "multi_thread")]
async fn drives_requests_and_aggregates_latencies() -> anyhow::Result<()> {
    let url = spawn_server("200 OK").await?;

    let generator = HttpLoadGenerator::new()?;
    let mut spec = LoadSpec::get(url);
    spec.connections = 2;
    spec.duration = Duration::from_millis(500);

    let snapshot = generator.generate(&spec).await?;

    assert!(snapshot.requests > 0);
    assert!(snapshot.rps_mean > 0.0);
    assert_eq!(snapshot.non_2xx, 0);
    assert_eq!(snapshot.timeouts, 0);
    assert!(snapshot.latency_p50_ms <= snapshot.latency_p95_ms);
    assert!(snapshot.latency_p95_ms <= snapshot.latency_p99_ms);
    assert!(snapshot.latency_p99_ms <= snapshot.latency_max_ms);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn counts_non_2xx_responses() -> anyhow::Result<()> {
    let url = spawn_server("404 Not Found").await?;

    let generator = HttpLoadGenerator::new()?;
    let mut spec = LoadSpec::get(url);
    spec.duration = Duration::from_millis(300);

    let snapshot = generator.generate(&spec).await?;

    assert!(snapshot.requests > 0);
    assert_eq!(snapshot.non_2xx, snapshot.requests);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_zero_connections() {
    let generator = HttpLoadGenerator::new().unwrap();
    let mut spec = LoadSpec::get("http://127.0.0.1:9/");
    spec.connections = 0;

    let result = generator.generate(&spec).await;
    assert!(matches!(result, Err(GeneratorError::InvalidSpec(_))));
}
