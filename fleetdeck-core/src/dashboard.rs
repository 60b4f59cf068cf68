//! Transient dashboard state shared with the UI root

/// Error surfaced to the user after a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationError {
    pub message: String,
}

/// Root store slice the UI reads.
///
/// Holds at most one error at a time; the navigation hooks clear it after
/// every completed transition so stale messages never outlive the page they
/// belong to.
#[derive(Debug, Default)]
pub struct DashboardState {
    error: Option<NavigationError>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(NavigationError {
            message: message.into(),
        });
    }

    pub fn error(&self) -> Option<&NavigationError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
