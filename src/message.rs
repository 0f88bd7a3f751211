//! Renderer → host messages.
//!
//! Web content talks to the host through two channels, both namespaced with
//! [`CHANNEL_PREFIX`] so they cannot collide with the application's own IPC:
//!
//! - [`OPEN_WINDOW_CHANNEL`] carries a route path to open as a routed window.
//! - [`OPEN_EXTERNAL_CHANNEL`] carries a URL for the platform's default
//!   application.
//!
//! ```
//! use routed_windows::message::{HostMessage, OPEN_WINDOW_CHANNEL};
//!
//! let msg = HostMessage::from_channel(OPEN_WINDOW_CHANNEL, &"/dashboard".into());
//! assert_eq!(msg, Some(HostMessage::OpenWindow { path: "/dashboard".into() }));
//! ```

use crate::debug_log;
use serde_json::Value;

/// Prefix shared by every channel this crate listens on.
pub const CHANNEL_PREFIX: &str = "routed-windows:";

/// Channel carrying a route path to open in a routed window.
pub const OPEN_WINDOW_CHANNEL: &str = "routed-windows:open-new-window";

/// Channel carrying a URL to open outside the application.
pub const OPEN_EXTERNAL_CHANNEL: &str = "routed-windows:open-external-link";

/// URL schemes the click listener treats as external.
pub const EXTERNAL_SCHEMES: [&str; 4] = ["http:", "https:", "mailto:", "ftp:"];

/// A message forwarded from web content to the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    /// Open `path` as a routed window.
    OpenWindow { path: String },
    /// Hand `url` to the platform opener.
    OpenExternal { url: String },
}

impl HostMessage {
    /// Parse a `(channel, payload)` pair.
    ///
    /// Returns `None` for channels outside this crate's namespace and for
    /// payloads that are not strings.
    pub fn from_channel(channel: &str, payload: &Value) -> Option<Self> {
        let build: fn(String) -> Self = match channel {
            OPEN_WINDOW_CHANNEL => |path| Self::OpenWindow { path },
            OPEN_EXTERNAL_CHANNEL => |url| Self::OpenExternal { url },
            _ => {
                debug_log!("Ignoring message on foreign channel '{}'", channel);
                return None;
            }
        };

        match payload {
            Value::String(text) => Some(build(text.clone())),
            other => {
                debug_log!(
                    "Dropping message on '{}': expected a string payload, got {}",
                    channel,
                    other
                );
                None
            }
        }
    }

    /// Channel this message travels on.
    pub fn channel(&self) -> &'static str {
        match self {
            Self::OpenWindow { .. } => OPEN_WINDOW_CHANNEL,
            Self::OpenExternal { .. } => OPEN_EXTERNAL_CHANNEL,
        }
    }

    /// Route a clicked link the way the injected listener does.
    pub fn for_link(href: &str) -> Self {
        match classify_link(href) {
            LinkKind::External => Self::OpenExternal {
                url: href.to_string(),
            },
            LinkKind::Internal => Self::OpenWindow {
                path: href.to_string(),
            },
        }
    }
}

/// Where a clicked link should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Matches one of [`EXTERNAL_SCHEMES`].
    External,
    /// Anything else: treated as an in-app route.
    Internal,
}

/// Classify an `href` with the same rule the injected script applies:
/// external iff it starts with one of [`EXTERNAL_SCHEMES`].
///
/// The match is case-sensitive, as in the script.
pub fn classify_link(href: &str) -> LinkKind {
    if EXTERNAL_SCHEMES
        .iter()
        .any(|scheme| href.starts_with(scheme))
    {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}
