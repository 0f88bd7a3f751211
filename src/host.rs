//! The native window host.
//!
//! [`WindowHost`] is everything the route manager needs from the windowing
//! toolkit: build a window, show it, ask whether it is gone, run a script
//! once its content has loaded, learn when it closes, and open URLs outside
//! the application. The `tauri` feature provides an implementation over
//! Tauri's webview windows; tests use a recording fake.
//!
//! Hosts call back on their UI event loop. Callbacks handed to the host are
//! `Send + 'static` because toolkits such as Tauri require it, even though
//! the manager never calls them concurrently.

use crate::error::WindowError;

/// Callback fired once when a window closes.
pub type ClosedCallback = Box<dyn FnOnce() + Send + 'static>;

/// Description of a window to build.
#[derive(Debug)]
pub struct WindowRequest<'a, O> {
    /// Id generated for the route at registration.
    pub route_id: &'a str,
    /// Route path being opened.
    pub path: &'a str,
    /// Process-local serial of this window, unique per manager.
    pub serial: u64,
    /// URL (or app-relative path) the window should load.
    pub target: &'a str,
    /// Caller-supplied construction options.
    pub options: &'a O,
}

/// Native window toolkit used by [`RouteWindowManager`](crate::RouteWindowManager).
pub trait WindowHost: Send + Sync + 'static {
    /// Handle to a native window. Clones refer to the same window.
    type Window: Clone + Send + Sync + 'static;

    /// Handle to a window's web content, passed to
    /// [`RouteConfig::configure_content`](crate::RouteConfig::configure_content) hooks.
    type Content: 'static;

    /// Construction options, forwarded untouched from the route config.
    type Options: Clone + Default + Send + Sync + 'static;

    /// Build a window and start loading `request.target`.
    fn create_window(&self, request: WindowRequest<'_, Self::Options>)
        -> Result<Self::Window, WindowError>;

    /// Bring `window` to the foreground.
    fn show(&self, window: &Self::Window);

    /// Whether `window` has already been destroyed.
    fn is_destroyed(&self, window: &Self::Window) -> bool;

    /// Content handle of `window`.
    fn content(&self, window: &Self::Window) -> Self::Content;

    /// Run `script` in the window's content once its first load finishes.
    fn inject_on_first_load(&self, window: &Self::Window, script: String);

    /// Call `on_closed` once when `window` closes.
    fn on_closed(&self, window: &Self::Window, on_closed: ClosedCallback);

    /// Open `url` with the platform's default application.
    fn open_external(&self, url: &str) -> Result<(), WindowError>;
}
