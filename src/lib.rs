//! Open in-app routes in dedicated native windows.
//!
//! Desktop apps built on a webview host often want certain links (a
//! dashboard, a document viewer, a settings pane) to open in their own
//! native window instead of navigating in place. This crate keeps a table of
//! such routes and, when one is activated, either focuses the window already
//! open for it or builds a new one, depending on the route's
//! `multiple_windows` policy.
//!
//! Each routed window gets a small click listener injected after its first
//! load. Links with `target="_blank"` are sent back to the host process:
//! external URLs (`http:`, `https:`, `mailto:`, `ftp:`) go to the platform
//! opener, anything else is treated as a route and activated again.
//!
//! # Quick start
//!
//! ```ignore
//! use routed_windows::tauri::{plugin, TauriWindowOptions};
//! use routed_windows::{RouteConfig, RoutesConfig};
//!
//! tauri::Builder::default()
//!     .plugin(plugin(
//!         RoutesConfig::new("index.html")
//!             .route(RouteConfig::new("/dashboard"))
//!             .route(
//!                 RouteConfig::new("/viewer")
//!                     .multiple_windows(true)
//!                     .window_options(TauriWindowOptions::default().title("Viewer")),
//!             ),
//!     ))
//!     .run(tauri::generate_context!())
//!     .expect("error while running tauri application");
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Description                                   |
//! |-----------|---------|-----------------------------------------------|
//! | `log`     | yes     | Log through the `log` crate                   |
//! | `tracing` | no      | Log through the `tracing` crate instead       |
//! | `tauri`   | no      | [`WindowHost`] implementation and Tauri plugin |
//!
//! Without `tauri`, implement [`WindowHost`] for your own toolkit.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

pub mod config;
pub mod error;
pub mod host;
pub mod id;
pub mod manager;
pub mod message;
pub mod registry;
pub mod script;
pub mod target;

#[cfg(feature = "tauri")]
#[cfg_attr(docsrs, doc(cfg(feature = "tauri")))]
pub mod tauri;

pub use config::{ContentHook, RouteConfig, RoutesConfig};
pub use error::{Activation, ConfigError, WindowError};
pub use host::{ClosedCallback, WindowHost, WindowRequest};
pub use id::generate_unique_id;
pub use manager::RouteWindowManager;
pub use message::{
    classify_link, HostMessage, LinkKind, OPEN_EXTERNAL_CHANNEL, OPEN_WINDOW_CHANNEL,
};
pub use registry::RouteMetadata;
pub use target::compose_target;
