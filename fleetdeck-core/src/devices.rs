//! Device resource client
//!
//! Devices are opaque server records; nothing is validated or cached on
//! this side beyond JSON parsing. Pagination and filtering are not
//! implemented by the API yet.

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::errors::{ApiError, error_for_status};
use crate::http::bearer_request;
use crate::session::SessionStore;

/// Client for the device endpoints of the fleetdeck API.
pub struct DeviceClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl DeviceClient {
    pub fn new(http: Client, base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Fetch all devices.
    pub async fn list_all(&self) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/devices", self.base_url);
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::GET, &url, &token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_for_status(
                resp.status(),
                "error fetching devices from server",
            ));
        }

        Ok(resp.json().await?)
    }

    /// Fetch one device; `None` when the server does not know the id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/device/{}", self.base_url, urlencoding::encode(id));
        self.fetch_optional(&url).await
    }

    /// Fetch the extended information document for a device.
    pub async fn get_info_by_id(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/device/{}/info", self.base_url, urlencoding::encode(id));
        self.fetch_optional(&url).await
    }

    /// Fetch the scope (groups and policies) applied to a device.
    pub async fn get_scope_by_id(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/device/{}/scope", self.base_url, urlencoding::encode(id));
        self.fetch_optional(&url).await
    }

    async fn fetch_optional(&self, url: &str) -> Result<Option<Value>, ApiError> {
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::GET, url, &token)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(error_for_status(
                resp.status(),
                "error fetching device from server",
            ));
        }

        Ok(Some(resp.json().await?))
    }
}
