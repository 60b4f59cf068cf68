//! Shared helpers for in-process HTTP tests

use std::sync::Arc;

use axum::Router;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::session::{MemoryTokenStore, SessionStore, TokenStore};

/// Serve a router on an ephemeral local port, returning its base URL.
pub(crate) async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Build a JWT-shaped token whose payload segment holds the given claims.
pub(crate) fn token_with_claims(claims: &str) -> String {
    format!("header.{}.signature", URL_SAFE_NO_PAD.encode(claims))
}

/// Session store pre-loaded with a token, backed by in-memory storage.
pub(crate) fn session_with_token(token: &str) -> Arc<SessionStore> {
    let storage = Arc::new(MemoryTokenStore::new());
    storage.save(token).unwrap();
    Arc::new(SessionStore::new(storage))
}
