//! Policy resource client

use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::errors::{ApiError, error_for_status};
use crate::http::bearer_request;
use crate::session::SessionStore;

/// Client for the policy endpoints of the fleetdeck API.
pub struct PolicyClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl PolicyClient {
    pub fn new(http: Client, base_url: &str, session: Arc<SessionStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Fetch all policies.
    pub async fn list_all(&self) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/policies", self.base_url);
        let token = self.session.token();

        let resp = bearer_request(&self.http, Method::GET, &url, &token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_for_status(
                resp.status(),
                "error fetching policies from server",
            ));
        }

        Ok(resp.json().await?)
    }

    /// Fetch one policy; `None` when the server does not know the id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/policy/{}", self.base_url, urlencoding::encode(id));
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
                "error fetching policy from server",
            ));
        }

        Ok(Some(resp.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{session_with_token, spawn_server};
    use axum::extract::Path;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};

    fn router() -> Router {
        Router::new()
            .route(
                "/policies",
                get(|| async {
                    Json(serde_json::json!([
                        { "ID": "p1", "Name": "Require PIN" },
                        { "ID": "p2", "Name": "Disable camera" }
                    ]))
                }),
            )
            .route(
                "/policy/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "p1" {
                        Json(serde_json::json!({ "ID": "p1", "Name": "Require PIN" }))
                            .into_response()
                    } else {
                        StatusCode::NOT_FOUND.into_response()
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_list_all() {
        let base_url = spawn_server(router()).await;
        let client = PolicyClient::new(Client::new(), &base_url, session_with_token("test-token"));

        let policies = client.list_all().await.unwrap();
        assert_eq!(policies.len(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let base_url = spawn_server(router()).await;
        let client = PolicyClient::new(Client::new(), &base_url, session_with_token("test-token"));

        let policy = client.get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(policy["Name"], "Require PIN");
        assert!(client.get_by_id("p9").await.unwrap().is_none());
    }
}
