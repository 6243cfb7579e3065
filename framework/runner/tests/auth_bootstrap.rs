use gale_runner::prelude::{acquire_token, AuthError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Fake auth server: responds to `POST /api/users` with `register_status` and
/// to `POST /api/users/login` with `login_status`, each carrying a Conduit
/// user envelope when successful.
async fn spawn_auth_server(
    register_status: &'static str,
    login_status: &'static str,
) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);

                let (status, token) = if request.starts_with("POST /api/users/login") {
                    (login_status, "login-token")
                } else {
                    (register_status, "register-token")
                };

                let body = format!(
                    r#"{{"user":{{"username":"tester","email":"t@example.com","token":"{token}"}}}}"#
                );
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            });
        }
    });

    Ok(format!("http://{addr}"))
}

#[tokio::test(flavor = "multi_thread")]
async fn registration_success_returns_the_issued_token() -> anyhow::Result<()> {
    let base_url = spawn_auth_server("200 OK", "200 OK").await?;
    let client = reqwest::Client::new();

    let token = acquire_token(&client, &base_url).await?;
    assert_eq!(token, "register-token");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_registration_falls_back_to_login() -> anyhow::Result<()> {
    let base_url = spawn_auth_server("409 Conflict", "200 OK").await?;
    let client = reqwest::Client::new();

    // The 409 must never surface when the login fallback succeeds.
    let token = acquire_token(&client, &base_url).await?;
    assert_eq!(token, "login-token");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_fallback_reports_the_login_status() -> anyhow::Result<()> {
    let base_url = spawn_auth_server("409 Conflict", "401 Unauthorized").await?;
    let client = reqwest::Client::new();

    let result = acquire_token(&client, &base_url).await;
    match result {
        Err(AuthError::LoginRejected { status }) => {
            assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
        }
        other => panic!("Expected LoginRejected, got {other:?}"),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_auth_endpoints_surface_a_transport_error() {
    // Nothing is listening on this port.
    let client = reqwest::Client::new();
    let result = acquire_token(&client, "http://127.0.0.1:9").await;

    assert!(matches!(result, Err(AuthError::Transport(_))));
}
