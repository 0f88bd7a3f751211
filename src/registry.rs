//! Route registry state.
//!
//! Two maps keyed by route path: [`RouteMetadata`] (id and live windows) and
//! `RouteHandler` (what to do on activation). Entries are added or
//! overwritten by registration and never removed.

use crate::config::RouteConfig;
use crate::host::WindowHost;
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// RouteMetadata
// ============================================================================

/// Window bookkeeping for one registered route.
///
/// `is_active()` holds exactly while at least one window opened for the
/// route has not reported closing. [`window`](Self::window) is the most
/// recently opened of those.
#[derive(Debug, Clone)]
pub struct RouteMetadata<W> {
    id: String,
    windows: Vec<LiveWindow<W>>,
}

#[derive(Debug, Clone)]
struct LiveWindow<W> {
    serial: u64,
    window: W,
}

impl<W> RouteMetadata<W> {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            windows: Vec::new(),
        }
    }

    /// Id generated when the route was registered.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether a window for this route is open.
    pub fn is_active(&self) -> bool {
        !self.windows.is_empty()
    }

    /// The most recently opened live window.
    pub fn window(&self) -> Option<&W> {
        self.windows.last().map(|live| &live.window)
    }

    /// Number of live windows for this route.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub(crate) fn attach(&mut self, serial: u64, window: W) {
        self.windows.push(LiveWindow { serial, window });
    }

    /// Forget the window with `serial`. Returns whether it was tracked.
    pub(crate) fn detach(&mut self, serial: u64) -> bool {
        let before = self.windows.len();
        self.windows.retain(|live| live.serial != serial);
        self.windows.len() != before
    }

    pub(crate) fn live_windows(&self) -> impl Iterator<Item = (u64, &W)> + '_ {
        self.windows.iter().map(|live| (live.serial, &live.window))
    }
}

// ============================================================================
// RouteHandler
// ============================================================================

/// Activation data for a route: its config and the base route it was
/// registered with.
pub(crate) struct RouteHandler<H: WindowHost> {
    pub(crate) config: Arc<RouteConfig<H>>,
    pub(crate) base_route: Arc<str>,
}

impl<H: WindowHost> RouteHandler<H> {
    pub(crate) fn new(config: RouteConfig<H>, base_route: Arc<str>) -> Self {
        Self {
            config: Arc::new(config),
            base_route,
        }
    }
}

impl<H: WindowHost> Clone for RouteHandler<H> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            base_route: Arc::clone(&self.base_route),
        }
    }
}

// ============================================================================
// RouteRegistry
// ============================================================================

/// Both per-path maps plus the window serial counter.
pub(crate) struct RouteRegistry<H: WindowHost> {
    pub(crate) metadata: HashMap<String, RouteMetadata<H::Window>>,
    pub(crate) handlers: HashMap<String, RouteHandler<H>>,
    next_serial: u64,
}

impl<H: WindowHost> RouteRegistry<H> {
    pub(crate) fn new() -> Self {
        Self {
            metadata: HashMap::new(),
            handlers: HashMap::new(),
            next_serial: 0,
        }
    }

    /// Insert or overwrite a route. Returns `true` if the path was already
    /// registered.
    pub(crate) fn register(&mut self, id: String, handler: RouteHandler<H>) -> bool {
        let path = handler.config.path.clone();
        self.metadata.insert(path.clone(), RouteMetadata::new(id));
        self.handlers.insert(path, handler).is_some()
    }

    pub(crate) fn next_serial(&mut self) -> u64 {
        self.next_serial += 1;
        self.next_serial
    }
}
