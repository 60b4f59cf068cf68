//! Session state and token persistence
//!
//! The session holds the current bearer token and the identity decoded from
//! it. The raw token survives restarts through a [`TokenStore`]; everything
//! else is rebuilt from the token on demand.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::claims::{self, Identity};

/// Current authentication state.
///
/// The token is the empty string when unauthenticated. Identity is only set
/// while a token is present and its claims decoded successfully.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub token: String,
    pub identity: Option<Identity>,
}

/// Durable storage for the raw session token.
///
/// One fixed entry; absence means unauthenticated.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self);
}

/// Token storage backed by a single file under the config directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove persisted token: {}", e);
            }
        }
    }
}

/// In-memory token storage, for tests and embedders with their own storage.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}

/// Shared session store.
///
/// Clients hold this behind an `Arc` and read the token at call time, so a
/// re-login is picked up by the next request. Concurrent login/logout calls
/// are not serialized: the last completing write wins.
pub struct SessionStore {
    session: RwLock<Session>,
    storage: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Create a store, restoring any previously persisted token.
    pub fn new(storage: Arc<dyn TokenStore>) -> Self {
        let token = storage.load().unwrap_or_default();
        Self {
            session: RwLock::new(Session {
                token,
                identity: None,
            }),
            storage,
        }
    }

    /// Current token; empty string when unauthenticated.
    pub fn token(&self) -> String {
        self.session.read().token.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session.read().identity.clone()
    }

    /// True iff a token is held.
    ///
    /// No expiry check happens client-side; an expired token is only
    /// discovered when the server answers 401.
    pub fn is_authenticated(&self) -> bool {
        !self.session.read().token.is_empty()
    }

    /// Store a new token and persist it.
    ///
    /// A persistence failure keeps the in-memory token: the login itself
    /// succeeded, only the restart convenience is lost.
    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.storage.save(token) {
            tracing::warn!("Failed to persist session token: {}", e);
        }
        let mut session = self.session.write();
        session.token = token.to_string();
        session.identity = None;
    }

    /// Decode the current token's claims into the session identity.
    ///
    /// No-op without a token. A decode failure leaves the identity
    /// unchanged: a corrupt token must not break navigation, the dashboard
    /// just shows no name.
    pub fn populate_identity(&self) {
        let token = self.token();
        if token.is_empty() {
            return;
        }
        match claims::decode_identity(&token) {
            Ok(identity) => {
                self.session.write().identity = Some(identity);
            }
            Err(e) => {
                tracing::debug!("Ignoring undecodable token claims: {}", e);
            }
        }
    }

    /// Drop the session: clears persisted storage, token and identity.
    ///
    /// Synchronous; no network call is involved.
    pub fn logout(&self) {
        self.storage.clear();
        let mut session = self.session.write();
        session.token.clear();
        session.identity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::token_with_claims;

    fn empty_store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn test_unauthenticated_by_default() {
        let store = empty_store();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), "");
        assert!(store.identity().is_none());
    }

    #[test]
    fn test_authenticated_iff_token_non_empty() {
        let store = empty_store();
        store.set_token("abc.def.ghi");
        assert!(store.is_authenticated());

        store.set_token("");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restores_persisted_token() {
        let storage = Arc::new(MemoryTokenStore::new());
        storage.save("persisted-token").unwrap();

        let store = SessionStore::new(storage);
        assert!(store.is_authenticated());
        assert_eq!(store.token(), "persisted-token");
        // Identity is only populated on demand
        assert!(store.identity().is_none());
    }

    #[test]
    fn test_set_token_persists() {
        let storage = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(Arc::clone(&storage) as Arc<dyn TokenStore>);

        store.set_token("fresh-token");
        assert_eq!(storage.load().as_deref(), Some("fresh-token"));
    }

    #[test]
    fn test_populate_identity() {
        let store = empty_store();
        store.set_token(&token_with_claims(
            r#"{"name":"Jane Doe","upn":"jane@example.com","org":"Acme"}"#,
        ));

        assert!(store.identity().is_none());
        store.populate_identity();

        let identity = store.identity().unwrap();
        assert_eq!(identity.name.as_deref(), Some("Jane Doe"));
        assert_eq!(identity.principal_name.as_deref(), Some("jane@example.com"));
        assert_eq!(identity.organization.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_populate_identity_without_token_is_noop() {
        let store = empty_store();
        store.populate_identity();
        assert!(store.identity().is_none());
    }

    #[test]
    fn test_populate_identity_swallows_decode_failure() {
        let store = empty_store();
        store.set_token(&token_with_claims(r#"{"upn":"jane@example.com"}"#));
        store.populate_identity();
        let before = store.identity();
        assert!(before.is_some());

        // Corrupt token: identity must stay as it was, and nothing panics
        store.session.write().token = "header.%%%.signature".to_string();
        store.populate_identity();
        assert_eq!(store.identity(), before);
    }

    #[test]
    fn test_logout_clears_everything() {
        let storage = Arc::new(MemoryTokenStore::new());
        let store = SessionStore::new(Arc::clone(&storage) as Arc<dyn TokenStore>);
        store.set_token(&token_with_claims(r#"{"upn":"jane@example.com"}"#));
        store.populate_identity();

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.identity().is_none());
        assert_eq!(storage.load(), None);
    }
}
