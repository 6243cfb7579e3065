use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

/// Fixed credentials shared by every run. Registration pairs them with a
/// fresh username so repeated runs fall back to login instead of colliding.
pub const TEST_EMAIL: &str = "gale-loadtest@example.com";
pub const TEST_PASSWORD: &str = "password123";

const USERNAME_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login rejected with status {status}")]
    LoginRejected { status: reqwest::StatusCode },
    #[error("auth transport failure")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    token: String,
}

pub fn fresh_username() -> String {
    format!("gale-{}", nanoid::nanoid!(10, &USERNAME_ALPHABET))
}

/// Registration body with a fresh username and the fixed credentials.
pub fn register_body(username: &str) -> String {
    serde_json::json!({
        "user": {
            "username": username,
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
        }
    })
    .to_string()
}

/// Login body for the fixed credentials.
pub fn login_body() -> String {
    serde_json::json!({
        "user": {
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
        }
    })
    .to_string()
}

/// Acquire a bearer token by registering a fresh user, falling back to login
/// with the fixed credentials when registration is rejected (typically a
/// duplicate email from an earlier run) or unreachable.
///
/// The registration failure is never surfaced if the login fallback succeeds.
pub async fn acquire_token(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<String, AuthError> {
    let username = fresh_username();
    let register = client
        .post(format!("{base_url}/api/users"))
        .header(CONTENT_TYPE, "application/json")
        .body(register_body(&username))
        .send()
        .await;

    match register {
        Ok(response) if response.status().is_success() => {
            match response.json::<UserEnvelope>().await {
                Ok(envelope) => return Ok(envelope.user.token),
                Err(e) => {
                    log::warn!("Registration response unreadable, falling back to login: {e}");
                }
            }
        }
        Ok(response) => {
            log::info!(
                "Registration rejected with {}, falling back to login",
                response.status()
            );
        }
        Err(e) => {
            log::warn!("Registration transport failure, falling back to login: {e}");
        }
    }

    let response = client
        .post(format!("{base_url}/api/users/login"))
        .header(CONTENT_TYPE, "application/json")
        .body(login_body())
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AuthError::LoginRejected {
            status: response.status(),
        });
    }

    let envelope: UserEnvelope = response.json().await?;
    Ok(envelope.user.token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_are_fresh_across_calls() {
        assert_ne!(fresh_username(), fresh_username());
    }

    #[test]
    fn register_body_carries_fixed_credentials() {
        let body: serde_json::Value =
            serde_json::from_str(&register_body("gale-abc123")).unwrap();

        assert_eq!(body["user"]["username"], "gale-abc123");
        assert_eq!(body["user"]["email"], TEST_EMAIL);
        assert_eq!(body["user"]["password"], TEST_PASSWORD);
    }
}
