//! Navigation guard for protected views
//!
//! Runs before each route change: makes sure the identity is populated,
//! then redirects unauthenticated visitors to the login page, carrying the
//! originally requested path so a successful login can send them back.

use crate::dashboard::DashboardState;
use crate::session::SessionStore;

/// Path of the login route the guard redirects to.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of the pre-navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Navigation proceeds unmodified.
    Proceed,
    /// Navigate to this path instead.
    Redirect(String),
}

/// Pre-navigation hook.
///
/// Identity population completes before the authentication check runs; the
/// check must not race ahead of it. The root path redirects without a
/// `redirect_to` parameter since there is nothing to return to.
pub fn check_navigation(session: &SessionStore, requested_path: &str) -> NavigationDecision {
    if session.identity().is_none() {
        session.populate_identity();
    }

    if session.is_authenticated() {
        return NavigationDecision::Proceed;
    }

    if requested_path == "/" {
        NavigationDecision::Redirect(LOGIN_PATH.to_string())
    } else {
        NavigationDecision::Redirect(format!(
            "{}?redirect_to={}",
            LOGIN_PATH,
            urlencoding::encode(requested_path)
        ))
    }
}

/// Post-navigation hook: a completed transition clears any stale error.
pub fn after_navigation(dashboard: &mut DashboardState) {
    dashboard.clear_error();
}
