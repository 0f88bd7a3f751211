//! The route window manager.
//!
//! [`RouteWindowManager`] owns the route registry and drives the host:
//!
//! 1. [`configure_routes`](RouteWindowManager::configure_routes) registers a
//!    route table.
//! 2. [`invoke_handler_for_route`](RouteWindowManager::invoke_handler_for_route)
//!    opens or reuses a window for a path. Unknown paths do nothing.
//! 3. [`handle_message`](RouteWindowManager::handle_message) feeds messages
//!    from the injected click listener back into step 2, or to the platform
//!    opener for external links.
//!
//! # Open-or-reuse policy
//!
//! | live window | `multiple_windows` | action               |
//! |-------------|--------------------|----------------------|
//! | yes         | `false`            | show the existing one |
//! | yes         | `true`             | create another       |
//! | no          | either             | create               |
//!
//! The manager is a cheap handle: clones share the same registry.

use crate::config::RoutesConfig;
use crate::error::{Activation, WindowError};
use crate::host::{WindowHost, WindowRequest};
use crate::id::generate_unique_id;
use crate::message::HostMessage;
use crate::registry::{RouteHandler, RouteMetadata, RouteRegistry};
use crate::script::{listener_script, DEFAULT_BRIDGE};
use crate::target::compose_target;
use crate::{debug_log, error_log, info_log, trace_log};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{Arc, Weak};

/// Opens registered routes in native windows.
pub struct RouteWindowManager<H: WindowHost> {
    inner: Arc<Inner<H>>,
}

struct Inner<H: WindowHost> {
    host: H,
    listener: String,
    bridge: String,
    registry: Mutex<RouteRegistry<H>>,
}

impl<H: WindowHost> RouteWindowManager<H> {
    /// Create a manager over `host`, with the listener talking to the
    /// default bridge object.
    pub fn new(host: H) -> Self {
        Self::with_bridge(host, DEFAULT_BRIDGE)
    }

    /// Create a manager whose injected listener uses `window.<bridge>`.
    pub fn with_bridge(host: H, bridge: impl Into<String>) -> Self {
        let bridge = bridge.into();
        Self {
            inner: Arc::new(Inner {
                host,
                listener: listener_script(&bridge),
                bridge,
                registry: Mutex::new(RouteRegistry::new()),
            }),
        }
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Name of the bridge object the listener expects.
    pub fn bridge(&self) -> &str {
        &self.inner.bridge
    }

    /// Script injected into every routed window.
    pub fn listener_script(&self) -> &str {
        &self.inner.listener
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register every route in `config`.
    ///
    /// A path registered again replaces the earlier metadata and handler.
    /// Windows opened under the replaced entry stay open but are no longer
    /// tracked.
    pub fn configure_routes(&self, config: RoutesConfig<H>) {
        let base_route: Arc<str> = Arc::from(config.base_route);
        let count = config.routes.len();

        let mut registry = self.inner.registry.lock();
        for route in config.routes {
            let id = generate_unique_id(&route.path);
            let path = route.path.clone();
            if registry.register(id, RouteHandler::new(route, Arc::clone(&base_route))) {
                debug_log!("Route '{}' registered again; previous entry replaced", path);
            }
        }
        drop(registry);

        info_log!("Registered {} routed window(s) under '{}'", count, base_route);
    }

    /// Whether `path` has a handler.
    pub fn is_registered(&self, path: &str) -> bool {
        self.inner.registry.lock().handlers.contains_key(path)
    }

    /// All registered paths, sorted.
    pub fn registered_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.inner.registry.lock().handlers.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Snapshot of the metadata for `path`.
    pub fn metadata(&self, path: &str) -> Option<RouteMetadata<H::Window>> {
        self.inner.registry.lock().metadata.get(path).cloned()
    }

    /// Whether a window for `path` is open.
    pub fn is_active(&self, path: &str) -> bool {
        self.inner
            .registry
            .lock()
            .metadata
            .get(path)
            .is_some_and(RouteMetadata::is_active)
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Open or reuse the window for `path`.
    ///
    /// Unknown paths are ignored and reported as
    /// [`Activation::NotRegistered`]. A host that fails to build the window
    /// yields `Err` and leaves the route's state untouched.
    pub fn invoke_handler_for_route(&self, path: &str) -> Result<Activation, WindowError> {
        let handler = self.inner.registry.lock().handlers.get(path).cloned();

        match handler {
            Some(handler) => self.activate(&handler),
            None => {
                debug_log!("No routed window registered for '{}'", path);
                Ok(Activation::NotRegistered {
                    path: path.to_string(),
                })
            }
        }
    }

    fn activate(&self, handler: &RouteHandler<H>) -> Result<Activation, WindowError> {
        let path = handler.config.path.as_str();

        if let Some(window) = self.live_window(path) {
            if !handler.config.multiple_windows {
                debug_log!("Reusing open window for '{}'", path);
                self.inner.host.show(&window);
                return Ok(Activation::Reused {
                    path: path.to_string(),
                });
            }
        }

        self.open_window(handler)
    }

    /// The newest live window for `path`, pruning any the host reports as
    /// destroyed.
    fn live_window(&self, path: &str) -> Option<H::Window> {
        let candidates = {
            let registry = self.inner.registry.lock();
            let metadata = registry.metadata.get(path)?;
            let windows: Vec<(u64, H::Window)> = metadata
                .live_windows()
                .map(|(serial, window)| (serial, window.clone()))
                .collect();
            windows
        };

        let (alive, destroyed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|(_, window)| !self.inner.host.is_destroyed(window));

        if !destroyed.is_empty() {
            let mut registry = self.inner.registry.lock();
            if let Some(metadata) = registry.metadata.get_mut(path) {
                for (serial, _) in &destroyed {
                    metadata.detach(*serial);
                }
            }
            debug_log!(
                "Pruned {} destroyed window(s) for '{}'",
                destroyed.len(),
                path
            );
        }

        alive.into_iter().last().map(|(_, window)| window)
    }

    fn open_window(&self, handler: &RouteHandler<H>) -> Result<Activation, WindowError> {
        let host = &self.inner.host;
        let path = handler.config.path.as_str();

        let (route_id, serial) = {
            let mut registry = self.inner.registry.lock();
            let route_id = registry
                .metadata
                .get(path)
                .map(|metadata| metadata.id().to_string());
            (route_id, registry.next_serial())
        };
        let route_id = route_id.unwrap_or_else(|| generate_unique_id(path));

        let target = compose_target(&handler.base_route, path);
        let options = handler.config.options_or_default();

        let window = host
            .create_window(WindowRequest {
                route_id: &route_id,
                path,
                serial,
                target: &target,
                options: &options,
            })
            .map_err(|err| {
                error_log!("{}", err);
                err
            })?;

        host.inject_on_first_load(&window, self.inner.listener.clone());

        if let Some(configure) = &handler.config.configure_content {
            configure(&host.content(&window));
        }

        let window_count = {
            let mut registry = self.inner.registry.lock();
            let metadata = registry
                .metadata
                .entry(path.to_string())
                .or_insert_with(|| RouteMetadata::new(route_id.clone()));
            metadata.attach(serial, window.clone());
            metadata.window_count()
        };

        let inner: Weak<Inner<H>> = Arc::downgrade(&self.inner);
        let closed_path = path.to_string();
        host.on_closed(
            &window,
            Box::new(move || {
                if let Some(inner) = inner.upgrade() {
                    inner.window_closed(&closed_path, serial);
                }
            }),
        );

        debug_log!(
            "Opened window #{} for '{}' at '{}' ({} live)",
            serial,
            path,
            target,
            window_count
        );

        Ok(Activation::Created {
            path: path.to_string(),
            window_count,
        })
    }

    // ========================================================================
    // Host messages
    // ========================================================================

    /// Act on a message from web content.
    ///
    /// Returns the activation outcome for window messages and `None` for
    /// external links.
    pub fn handle_message(&self, message: HostMessage) -> Result<Option<Activation>, WindowError> {
        trace_log!("Handling {:?}", message);
        match message {
            HostMessage::OpenWindow { path } => self.invoke_handler_for_route(&path).map(Some),
            HostMessage::OpenExternal { url } => self.open_external(&url).map(|()| None),
        }
    }

    /// Parse and act on a raw `(channel, payload)` pair from the bridge.
    ///
    /// Foreign channels and malformed payloads are ignored.
    pub fn handle_raw_message(
        &self,
        channel: &str,
        payload: &Value,
    ) -> Result<Option<Activation>, WindowError> {
        match HostMessage::from_channel(channel, payload) {
            Some(message) => self.handle_message(message),
            None => Ok(None),
        }
    }

    /// Hand `url` to the platform opener. The URL is not validated.
    pub fn open_external(&self, url: &str) -> Result<(), WindowError> {
        debug_log!("Opening external link '{}'", url);
        self.inner.host.open_external(url).map_err(|err| {
            error_log!("{}", err);
            err
        })
    }
}

impl<H: WindowHost> Inner<H> {
    fn window_closed(&self, path: &str, serial: u64) {
        let mut registry = self.registry.lock();
        let Some(metadata) = registry.metadata.get_mut(path) else {
            return;
        };
        if metadata.detach(serial) {
            debug_log!(
                "Window #{} for '{}' closed ({} live)",
                serial,
                path,
                metadata.window_count()
            );
        }
    }
}

impl<H: WindowHost> Clone for RouteWindowManager<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: WindowHost + std::fmt::Debug> std::fmt::Debug for RouteWindowManager<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteWindowManager")
            .field("host", &self.inner.host)
            .field("bridge", &self.inner.bridge)
            .field("routes", &self.registered_paths())
            .finish()
    }
}
