//! Login flow against the fleetdeck API
//!
//! Login exchanges credentials for a session token. The token is persisted
//! through the session store so the console stays signed in across
//! restarts. Logout lives on [`SessionStore`] since it needs no network
//! call.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, error_for_status};
use crate::session::SessionStore;

/// Credential pair submitted to the login endpoint. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub principal_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the authentication endpoint.
pub struct AuthClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AuthClient {
    pub fn new(http: Client, base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Exchange credentials for a session token.
    ///
    /// On 200 the token is stored, persisted, and its claims decoded into
    /// the session identity. Any other status is classified; a transport
    /// failure surfaces as a communication error.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let url = format!("{}/login", self.base_url);

        let resp = self.http.post(&url).json(request).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(error_for_status(
                resp.status(),
                "the login request was rejected",
            ));
        }

        let auth: LoginResponse = resp.json().await?;
        self.session.set_token(&auth.token);
        self.session.populate_identity();

        tracing::debug!("Login succeeded for {}", request.principal_name);
        Ok(())
    }
}
