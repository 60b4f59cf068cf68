//! User resource client
//!
//! The only resource with a create operation so far; the server answers
//! 204 on success but older deployments return 200, so both are accepted.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::errors::{ApiError, error_for_status};
use crate::http::bearer_request;
use crate::session::SessionStore;

/// Payload for creating a user account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub principal_name: String,
    pub full_name: String,
    pub password: String,
}

/// Client for the user endpoints of the fleetdeck API.
pub struct UserClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl UserClient {
    pub fn new(http: Client, base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Fetch all users.
    pub async fn list_all(&self) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/users", self.base_url);
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::GET, &url, &token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_for_status(
                resp.status(),
                "error fetching users from server",
            ));
        }

        Ok(resp.json().await?)
    }

    /// Fetch one user; `None` when the server does not know the id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/user/{}", self.base_url, urlencoding::encode(id));
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::GET, &url, &token)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(error_for_status(
                resp.status(),
                "error fetching user from server",
            ));
        }

        Ok(Some(resp.json().await?))
    }

    /// Create a user account.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<(), ApiError> {
        let url = format!("{}/users", self.base_url);
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::POST, &url, &token)
            .json(request)
            .send()
            .await?;
        if resp.status() != StatusCode::OK && resp.status() != StatusCode::NO_CONTENT {
            return Err(error_for_status(
                resp.status(),
                "error creating user on server",
            ));
        }

        Ok(())
    }
}
