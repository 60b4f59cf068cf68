//! fleetdeck-core: client-side data and authentication layer for the
//! fleetdeck admin console
//!
//! This crate provides:
//! - Authenticated REST clients for devices, groups, policies and users
//! - A session store holding the bearer token and decoded identity
//! - A navigation guard redirecting unauthenticated users to login
//! - Configuration and token persistence

pub mod auth;
pub mod claims;
pub mod config;
pub mod dashboard;
pub mod devices;
pub mod errors;
pub mod groups;
pub mod guard;
pub mod http;
pub mod policies;
pub mod session;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthClient, LoginRequest};
pub use claims::Identity;
pub use config::Config;
pub use errors::ApiError;
pub use guard::NavigationDecision;
pub use session::{FileTokenStore, MemoryTokenStore, SessionStore, TokenStore};

/// Default port the fleetdeck API server listens on
pub const DEFAULT_API_PORT: u16 = 8000;

/// Fixed file name for the persisted session token
pub const TOKEN_FILE_NAME: &str = "session-token";
