//! Error and outcome types.
//!
//! - [`Activation`]: what an activation did (`Created`, `Reused`,
//!   `NotRegistered`). An unknown route is an outcome, not an error.
//! - [`WindowError`]: failures reported by the native host while building
//!   a window or handing a URL to the platform opener.
//! - [`ConfigError`]: a route table that could not be parsed.
//!
//! # Examples
//!
//! ```
//! use routed_windows::error::Activation;
//!
//! let outcome = Activation::NotRegistered { path: "/nowhere".into() };
//! assert!(outcome.is_not_registered());
//! assert!(!outcome.opened_window());
//! ```

use std::fmt;

// ============================================================================
// Activation outcome
// ============================================================================

/// Outcome of [`RouteWindowManager::invoke_handler_for_route`](crate::RouteWindowManager::invoke_handler_for_route).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A new native window was built for the route.
    Created {
        /// Route that was activated.
        path: String,
        /// Number of live windows for the route after creation.
        window_count: usize,
    },
    /// An existing window for the route was brought to the foreground.
    Reused { path: String },
    /// No handler is registered for the path; nothing happened.
    NotRegistered { path: String },
}

impl Activation {
    /// Check if a new window was created
    pub fn is_created(&self) -> bool {
        matches!(self, Activation::Created { .. })
    }

    /// Check if an existing window was reused
    pub fn is_reused(&self) -> bool {
        matches!(self, Activation::Reused { .. })
    }

    /// Check if the path was unknown
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Activation::NotRegistered { .. })
    }

    /// Whether a window is now showing for the route (created or reused).
    pub fn opened_window(&self) -> bool {
        !self.is_not_registered()
    }

    /// The activated path.
    pub fn path(&self) -> &str {
        match self {
            Activation::Created { path, .. }
            | Activation::Reused { path }
            | Activation::NotRegistered { path } => path,
        }
    }
}

// ============================================================================
// Host errors
// ============================================================================

/// Failure reported by the native window host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The host could not construct a window for a route.
    Create { path: String, message: String },

    /// The platform opener rejected an external URL.
    OpenExternal { url: String, message: String },
}

impl WindowError {
    /// Shorthand for a construction failure.
    pub fn create(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Create {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Shorthand for an opener failure.
    pub fn open_external(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::OpenExternal {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Create { path, message } => {
                write!(f, "Failed to create window for route {}: {}", path, message)
            }
            WindowError::OpenExternal { url, message } => {
                write!(f, "Failed to open external link {}: {}", url, message)
            }
        }
    }
}

impl std::error::Error for WindowError {}

// ============================================================================
// Configuration errors
// ============================================================================

/// A route table that could not be parsed.
#[derive(Debug)]
pub enum ConfigError {
    /// The input was not valid JSON or did not match the route table shape.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "Invalid route configuration: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

// ============================================================================
// Tests
// ============================================================================
