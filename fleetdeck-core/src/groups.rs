//! Group resource client

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::errors::{ApiError, error_for_status};
use crate::http::bearer_request;
use crate::session::SessionStore;

/// Client for the group endpoints of the fleetdeck API.
pub struct GroupClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl GroupClient {
    pub fn new(http: Client, base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Fetch all groups.
    pub async fn list_all(&self) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/groups", self.base_url);
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::GET, &url, &token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_for_status(
                resp.status(),
                "error fetching groups from server",
            ));
        }

        Ok(resp.json().await?)
    }

    /// Fetch one group; `None` when the server does not know the id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/group/{}", self.base_url, urlencoding::encode(id));
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
                "error fetching group from server",
            ));
        }

        Ok(Some(resp.json().await?))
    }
}
