use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::InpiError;

/// INPI SSO login response.
#[derive(Debug, Deserialize, Serialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// Exchange credentials for a bearer token.
///
/// Any failure along the way (transport, HTTP error status, malformed or
/// token-less response body) is an authentication error; login is never
/// retried.
pub(super) async fn fetch_token(
    http: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String, InpiError> {
    let url = format!("{base_url}/sso/login");
    debug!(%url, "authenticating with INPI");

    let response = http
        .post(&url)
        .json(&Credentials { username, password })
        .send()
        .await
        .map_err(|e| InpiError::Authentication(format!("login request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| InpiError::Authentication(format!("login response unreadable: {e}")))?;

    if !status.is_success() {
        return Err(InpiError::Authentication(format!(
            "login rejected with status {status}: {body}"
        )));
    }

    let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
        InpiError::Authentication(format!("malformed login response: {e}"))
    })?;

    match parsed.token {
        Some(token) if !token.is_empty() => {
            info!("authenticated with INPI");
            Ok(token)
        }
        _ => Err(InpiError::Authentication(
            "no token found in the authentication response".to_string(),
        )),
    }
}
