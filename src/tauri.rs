//! Tauri binding.
//!
//! [`TauriHost`] implements [`WindowHost`] over Tauri's webview windows and
//! [`plugin`] wires a [`RouteWindowManager`] into an app:
//!
//! - the bridge (`window.routedWindowsApi.sendMessage`) and the click
//!   listener are installed in every webview as an init script, so links in
//!   the main window are routed too; the bridge emits each message as a
//!   Tauri event named after the channel;
//! - the host listens for both channels and handles them on the main thread.
//!
//! Routed windows get labels starting with `window-`, so a capability that
//! should cover them needs a pattern such as `"windows": ["main", "window-*"]`
//! and the `core:event:allow-emit` permission.

use crate::config::RoutesConfig;
use crate::error::WindowError;
use crate::host::{ClosedCallback, WindowHost, WindowRequest};
use crate::manager::RouteWindowManager;
use crate::message::{OPEN_EXTERNAL_CHANNEL, OPEN_WINDOW_CHANNEL};
use crate::script::{init_script, DEFAULT_BRIDGE};
use crate::{debug_log, error_log, warn_log};
use ::tauri::plugin::{Builder as PluginBuilder, TauriPlugin};
use ::tauri::webview::PageLoadEvent;
use ::tauri::{
    AppHandle, Listener, Manager, Runtime, Url, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
    WindowEvent,
};
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tauri_plugin_opener::OpenerExt;

/// Name of the plugin registered by [`plugin`].
pub const PLUGIN_NAME: &str = "routed-windows";

/// Sends bridge messages as Tauri events; the event name is the channel.
const EMIT_EXPR: &str = "function (channel, payload) {\n    \
     return window.__TAURI_INTERNALS__.invoke('plugin:event|emit', \
     { event: channel, payload: payload });\n  }";

// ============================================================================
// Window options
// ============================================================================

/// Construction options for a routed Tauri window.
///
/// Every field is optional; unset fields keep Tauri's defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TauriWindowOptions {
    pub title: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub center: bool,
    pub resizable: Option<bool>,
    pub decorations: Option<bool>,
    pub always_on_top: Option<bool>,
    pub focused: Option<bool>,
    pub visible: Option<bool>,
    pub maximized: Option<bool>,
}

impl TauriWindowOptions {
    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the inner size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Center the window on screen.
    pub fn centered(mut self) -> Self {
        self.center = true;
        self
    }

    fn apply<'a, R: Runtime, M: Manager<R>>(
        &self,
        mut builder: WebviewWindowBuilder<'a, R, M>,
    ) -> WebviewWindowBuilder<'a, R, M> {
        if let Some(title) = &self.title {
            builder = builder.title(title);
        }
        if let (Some(width), Some(height)) = (self.width, self.height) {
            builder = builder.inner_size(width, height);
        }
        if let (Some(min_width), Some(min_height)) = (self.min_width, self.min_height) {
            builder = builder.min_inner_size(min_width, min_height);
        }
        if let (Some(x), Some(y)) = (self.x, self.y) {
            builder = builder.position(x, y);
        }
        if self.center {
            builder = builder.center();
        }
        if let Some(resizable) = self.resizable {
            builder = builder.resizable(resizable);
        }
        if let Some(decorations) = self.decorations {
            builder = builder.decorations(decorations);
        }
        if let Some(always_on_top) = self.always_on_top {
            builder = builder.always_on_top(always_on_top);
        }
        if let Some(focused) = self.focused {
            builder = builder.focused(focused);
        }
        if let Some(visible) = self.visible {
            builder = builder.visible(visible);
        }
        if let Some(maximized) = self.maximized {
            builder = builder.maximized(maximized);
        }
        builder
    }
}

// ============================================================================
// TauriHost
// ============================================================================

/// [`WindowHost`] over a Tauri app.
pub struct TauriHost<R: Runtime> {
    app: AppHandle<R>,
    /// Scripts waiting for their window's first finished page load, by label.
    pending_scripts: Arc<Mutex<HashMap<String, String>>>,
}

impl<R: Runtime> TauriHost<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            pending_scripts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The app this host builds windows for.
    pub fn app(&self) -> &AppHandle<R> {
        &self.app
    }
}

/// Label for a routed window: the route id plus the window serial.
pub fn window_label(route_id: &str, serial: u64) -> String {
    format!("{}-{}", route_id, serial)
}

/// Absolute URLs load as-is, anything else is resolved against the app's
/// bundled assets.
pub fn webview_url(target: &str) -> WebviewUrl {
    match Url::parse(target) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "tauri" | "asset") => {
            WebviewUrl::External(url)
        }
        _ => WebviewUrl::App(PathBuf::from(target)),
    }
}

impl<R: Runtime> WindowHost for TauriHost<R> {
    type Window = WebviewWindow<R>;
    type Content = WebviewWindow<R>;
    type Options = TauriWindowOptions;

    fn create_window(
        &self,
        request: WindowRequest<'_, TauriWindowOptions>,
    ) -> Result<WebviewWindow<R>, WindowError> {
        let label = window_label(request.route_id, request.serial);
        let pending = Arc::clone(&self.pending_scripts);

        let builder = WebviewWindowBuilder::new(&self.app, &label, webview_url(request.target))
            .on_page_load(move |window, payload| {
                if !matches!(payload.event(), PageLoadEvent::Finished) {
                    return;
                }
                let script = pending.lock().remove(window.label());
                if let Some(script) = script {
                    if let Err(err) = window.eval(&script) {
                        error_log!("Failed to inject listener into '{}': {}", window.label(), err);
                    }
                }
            });

        request
            .options
            .apply(builder)
            .build()
            .map_err(|err| WindowError::create(request.path, err))
    }

    fn show(&self, window: &WebviewWindow<R>) {
        if window.is_minimized().unwrap_or(false) {
            if let Err(err) = window.unminimize() {
                warn_log!("Failed to unminimize '{}': {}", window.label(), err);
            }
        }
        if let Err(err) = window.show() {
            warn_log!("Failed to show '{}': {}", window.label(), err);
        }
        if let Err(err) = window.set_focus() {
            warn_log!("Failed to focus '{}': {}", window.label(), err);
        }
    }

    fn is_destroyed(&self, window: &WebviewWindow<R>) -> bool {
        self.app.get_webview_window(window.label()).is_none()
    }

    fn content(&self, window: &WebviewWindow<R>) -> WebviewWindow<R> {
        window.clone()
    }

    fn inject_on_first_load(&self, window: &WebviewWindow<R>, script: String) {
        self.pending_scripts
            .lock()
            .insert(window.label().to_string(), script);
    }

    fn on_closed(&self, window: &WebviewWindow<R>, on_closed: ClosedCallback) {
        let callback = Mutex::new(Some(on_closed));
        let pending = Arc::clone(&self.pending_scripts);
        let label = window.label().to_string();

        window.on_window_event(move |event| {
            if let WindowEvent::Destroyed = event {
                pending.lock().remove(&label);
                if let Some(callback) = callback.lock().take() {
                    callback();
                }
            }
        });
    }

    fn open_external(&self, url: &str) -> Result<(), WindowError> {
        self.app
            .opener()
            .open_url(url, None::<String>)
            .map_err(|err| WindowError::open_external(url, err))
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// Build the `routed-windows` plugin for `routes`.
///
/// External links go through `tauri-plugin-opener`, which must be
/// initialised on the app as well.
pub fn plugin<R: Runtime>(routes: RoutesConfig<TauriHost<R>>) -> TauriPlugin<R> {
    PluginBuilder::new(PLUGIN_NAME)
        .js_init_script(plugin_init_script())
        .setup(move |app, _api| {
            let manager = RouteWindowManager::new(TauriHost::new(app.clone()));
            manager.configure_routes(routes);

            for channel in [OPEN_WINDOW_CHANNEL, OPEN_EXTERNAL_CHANNEL] {
                listen(app, &manager, channel);
            }

            app.manage(manager);
            Ok(())
        })
        .build()
}

/// Bridge plus click listener, installed in every webview of the app.
fn plugin_init_script() -> String {
    init_script(DEFAULT_BRIDGE, EMIT_EXPR)
}

fn listen<R: Runtime>(
    app: &AppHandle<R>,
    manager: &RouteWindowManager<TauriHost<R>>,
    channel: &'static str,
) {
    let manager = manager.clone();
    let handle = app.clone();

    app.listen_any(channel, move |event| {
        let payload: serde_json::Value = match serde_json::from_str(event.payload()) {
            Ok(payload) => payload,
            Err(err) => {
                warn_log!("Dropping malformed '{}' payload: {}", channel, err);
                return;
            }
        };

        let manager = manager.clone();
        let dispatched = handle.run_on_main_thread(move || {
            // Errors are already logged by the manager.
            let _ = manager.handle_raw_message(channel, &payload);
        });
        if let Err(err) = dispatched {
            error_log!("Failed to dispatch '{}' to the main thread: {}", channel, err);
        }
    });

    debug_log!("Listening for '{}'", channel);
}
