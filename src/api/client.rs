//! HTTP client for the recipe backend

use crate::config::LadleConfig;
use crate::error::LadleError;
use crate::session::IdentityProbe;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout for reads
pub(crate) const GET_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-request timeout for mutations
pub(crate) const WRITE_TIMEOUT: Duration = Duration::from_secs(15);
/// Per-request timeout for search (can return large result sets)
pub(crate) const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the recipe backend.
///
/// Holds the cookie store that carries the session, so every call made
/// through the same `ApiClient` shares one identity.
#[derive(Debug)]
pub struct ApiClient {
    origin: String,
    http: Client,
}

/// Response from `GET /me`
#[derive(Debug, Deserialize)]
struct MeResponse {
    username: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Registration payload for `POST /Register`
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub country: String,
    pub password: String,
    pub email: String,
}

/// Error response from the backend
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

impl ApiClient {
    /// Create a client for the given backend origin
    pub fn new(origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into().trim_end_matches('/').to_string();
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { origin, http })
    }

    /// Create a client from config
    pub fn from_config(config: &LadleConfig) -> Result<Self> {
        Self::new(config.server_origin.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Map a non-success response to the matching error variant.
    pub(crate) async fn response_error(response: Response) -> LadleError {
        let status = response.status();
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|e| e.message)
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::PAYMENT_REQUIRED => LadleError::QuotaExceeded,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LadleError::Auth(message),
            _ => LadleError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Health check against `GET /alive`. Any failure means "not alive".
    pub async fn check_alive(&self) -> bool {
        let result = self
            .http
            .get(self.url("/alive"))
            .timeout(GET_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "health check failed");
                false
            }
        }
    }

    /// Identity check against `GET /me`.
    ///
    /// Returns the username for a valid session and `None` otherwise; a
    /// missing session is an expected outcome, not an error.
    pub async fn me(&self) -> Option<String> {
        let response = self
            .http
            .get(self.url("/me"))
            .timeout(GET_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        response.json::<MeResponse>().await.ok().map(|m| m.username)
    }

    /// Log in with credentials. The backend sets the session cookie on
    /// success; the cookie store picks it up for subsequent calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(LadleError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let response = self
            .http
            .post(self.url("/Login"))
            .timeout(WRITE_TIMEOUT)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }

    /// Log out, clearing the server-side session.
    pub async fn logout(&self) -> Result<()> {
        let response = self
            .http
            .post(self.url("/Logout"))
            .timeout(WRITE_TIMEOUT)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }

    /// Register a new user account.
    pub async fn register(&self, user: &NewUser) -> Result<()> {
        let response = self
            .http
            .post(self.url("/Register"))
            .timeout(WRITE_TIMEOUT)
            .json(user)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProbe for ApiClient {
    async fn current_principal(&self) -> Option<String> {
        self.me().await
    }
}
