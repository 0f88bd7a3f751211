//! Route table configuration.
//!
//! A [`RoutesConfig`] pairs a base route (the document every routed window
//! loads) with the list of [`RouteConfig`]s that should open natively.
//! Tables are built in code or parsed from JSON:
//!
//! ```json
//! {
//!   "baseRoute": "index.html",
//!   "routes": [
//!     { "path": "/dashboard", "newWindow": true },
//!     { "path": "/viewer", "newWindow": true, "multipleWindows": true,
//!       "windowOptions": { "title": "Viewer" } }
//!   ]
//! }
//! ```
//!
//! Content hooks cannot be expressed in JSON; attach them afterwards with
//! [`RoutesConfig::configure_content`].

use crate::error::ConfigError;
use crate::host::WindowHost;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Hook run with a freshly created window's content handle.
pub type ContentHook<H> = Arc<dyn Fn(&<H as WindowHost>::Content) + Send + Sync>;

// ============================================================================
// RouteConfig
// ============================================================================

/// How a single route opens.
///
/// # Example
///
/// ```ignore
/// let route = RouteConfig::<TauriHost<_>>::new("/viewer")
///     .multiple_windows(true)
///     .window_options(TauriWindowOptions::default().title("Viewer"))
///     .configure_content(|webview| { let _ = webview.eval("console.log('ready')"); });
/// ```
pub struct RouteConfig<H: WindowHost> {
    /// Route path, the registry key.
    pub path: String,
    /// Whether the route is meant to open natively. Informational only;
    /// registration is what makes a route open in a window.
    pub new_window: bool,
    /// Allow more than one live window for this route.
    pub multiple_windows: bool,
    /// Options forwarded to the host's window constructor.
    pub window_options: Option<H::Options>,
    /// Hook run with the new window's content handle.
    pub configure_content: Option<ContentHook<H>>,
}

impl<H: WindowHost> RouteConfig<H> {
    /// A route that opens in a single reusable window.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            new_window: true,
            multiple_windows: false,
            window_options: None,
            configure_content: None,
        }
    }

    /// Set the informational `new_window` flag.
    pub fn new_window(mut self, new_window: bool) -> Self {
        self.new_window = new_window;
        self
    }

    /// Allow or forbid several live windows for this route.
    pub fn multiple_windows(mut self, multiple_windows: bool) -> Self {
        self.multiple_windows = multiple_windows;
        self
    }

    /// Options passed to the window constructor.
    pub fn window_options(mut self, options: H::Options) -> Self {
        self.window_options = Some(options);
        self
    }

    /// Run `hook` with each new window's content handle.
    pub fn configure_content<F>(mut self, hook: F) -> Self
    where
        F: Fn(&H::Content) + Send + Sync + 'static,
    {
        self.configure_content = Some(Arc::new(hook));
        self
    }

    /// Options for the constructor, falling back to the host default.
    pub fn options_or_default(&self) -> H::Options {
        self.window_options.clone().unwrap_or_default()
    }
}

impl<H: WindowHost> Clone for RouteConfig<H> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            new_window: self.new_window,
            multiple_windows: self.multiple_windows,
            window_options: self.window_options.clone(),
            configure_content: self.configure_content.clone(),
        }
    }
}

impl<H: WindowHost> fmt::Debug for RouteConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteConfig")
            .field("path", &self.path)
            .field("new_window", &self.new_window)
            .field("multiple_windows", &self.multiple_windows)
            .field("has_window_options", &self.window_options.is_some())
            .field("has_configure_content", &self.configure_content.is_some())
            .finish()
    }
}

// ============================================================================
// RoutesConfig
// ============================================================================

/// A base route plus the routes that open in their own windows.
pub struct RoutesConfig<H: WindowHost> {
    /// Document every routed window loads; the route goes in the fragment.
    pub base_route: String,
    /// Routes to register, in order. Later duplicates win.
    pub routes: Vec<RouteConfig<H>>,
}

impl<H: WindowHost> RoutesConfig<H> {
    /// An empty table loading `base_route`.
    pub fn new(base_route: impl Into<String>) -> Self {
        Self {
            base_route: base_route.into(),
            routes: Vec::new(),
        }
    }

    /// Add a route.
    pub fn route(mut self, route: RouteConfig<H>) -> Self {
        self.routes.push(route);
        self
    }

    /// Add several routes.
    pub fn routes(mut self, routes: impl IntoIterator<Item = RouteConfig<H>>) -> Self {
        self.routes.extend(routes);
        self
    }

    /// Attach `hook` to every route registered under `path`.
    pub fn configure_content<F>(mut self, path: &str, hook: F) -> Self
    where
        F: Fn(&H::Content) + Send + Sync + 'static,
    {
        let hook: ContentHook<H> = Arc::new(hook);
        for route in self.routes.iter_mut().filter(|route| route.path == path) {
            route.configure_content = Some(Arc::clone(&hook));
        }
        self
    }
}

impl<H: WindowHost> RoutesConfig<H>
where
    H::Options: DeserializeOwned,
{
    /// Parse a route table from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawRoutes<H::Options> = serde_json::from_str(json)?;
        Ok(raw.into_config())
    }

    /// Build a route table from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let raw: RawRoutes<H::Options> = serde_json::from_value(value)?;
        Ok(raw.into_config())
    }
}

impl<H: WindowHost> Clone for RoutesConfig<H> {
    fn clone(&self) -> Self {
        Self {
            base_route: self.base_route.clone(),
            routes: self.routes.clone(),
        }
    }
}

impl<H: WindowHost> fmt::Debug for RoutesConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutesConfig")
            .field("base_route", &self.base_route)
            .field("routes", &self.routes)
            .finish()
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoutes<O> {
    base_route: String,
    #[serde(default = "Vec::new")]
    routes: Vec<RawRoute<O>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute<O> {
    path: String,
    new_window: bool,
    #[serde(default)]
    multiple_windows: bool,
    #[serde(default = "Option::default")]
    window_options: Option<O>,
}

impl<O> RawRoutes<O> {
    fn into_config<H>(self) -> RoutesConfig<H>
    where
        H: WindowHost<Options = O>,
    {
        RoutesConfig {
            base_route: self.base_route,
            routes: self
                .routes
                .into_iter()
                .map(|raw| RouteConfig {
                    path: raw.path,
                    new_window: raw.new_window,
                    multiple_windows: raw.multiple_windows,
                    window_options: raw.window_options,
                    configure_content: None,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
