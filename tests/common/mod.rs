//! Test utilities for routed window tests
//!
//! Provides a recording [`MockHost`] plus fixtures for route tables.

#![allow(dead_code)]

use parking_lot::Mutex;
use routed_windows::*;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Route the mock windows load.
pub const BASE_ROUTE: &str = "index.html";

/// Handle to a mock window, identified by the serial the manager assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockWindow(pub u64);

/// Content handle passed to configure hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockContent {
    pub window: MockWindow,
}

/// Options recorded on each creation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MockOptions {
    pub title: Option<String>,
    pub width: Option<u32>,
}

/// Everything the manager asked the host to build.
#[derive(Debug, Clone, PartialEq)]
pub struct Creation {
    pub window: MockWindow,
    pub route_id: String,
    pub path: String,
    pub target: String,
    pub options: MockOptions,
}

#[derive(Default)]
struct MockState {
    creations: Vec<Creation>,
    shown: Vec<MockWindow>,
    scripts: Vec<(MockWindow, String)>,
    on_closed: HashMap<MockWindow, ClosedCallback>,
    destroyed: HashSet<MockWindow>,
    external: Vec<String>,
    fail_create: bool,
    fail_open: bool,
}

/// A [`WindowHost`] that records every call instead of opening windows.
#[derive(Clone, Default)]
pub struct MockHost {
    state: Arc<Mutex<MockState>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close `window` the way a user would: mark it destroyed, then fire the
    /// close callback.
    pub fn close(&self, window: MockWindow) {
        let callback = {
            let mut state = self.state.lock();
            state.destroyed.insert(window);
            state.on_closed.remove(&window)
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Destroy `window` without delivering its close notification.
    pub fn destroy_silently(&self, window: MockWindow) {
        self.state.lock().destroyed.insert(window);
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.lock().fail_create = fail;
    }

    pub fn fail_open(&self, fail: bool) {
        self.state.lock().fail_open = fail;
    }

    pub fn creations(&self) -> Vec<Creation> {
        self.state.lock().creations.clone()
    }

    pub fn creation_count(&self) -> usize {
        self.state.lock().creations.len()
    }

    pub fn shown(&self) -> Vec<MockWindow> {
        self.state.lock().shown.clone()
    }

    pub fn scripts(&self) -> Vec<(MockWindow, String)> {
        self.state.lock().scripts.clone()
    }

    pub fn external_urls(&self) -> Vec<String> {
        self.state.lock().external.clone()
    }

    pub fn has_close_handler(&self, window: MockWindow) -> bool {
        self.state.lock().on_closed.contains_key(&window)
    }
}

impl WindowHost for MockHost {
    type Window = MockWindow;
    type Content = MockContent;
    type Options = MockOptions;

    fn create_window(
        &self,
        request: WindowRequest<'_, MockOptions>,
    ) -> Result<MockWindow, WindowError> {
        let mut state = self.state.lock();
        if state.fail_create {
            return Err(WindowError::create(
                request.path,
                "mock refused to build window",
            ));
        }

        let window = MockWindow(request.serial);
        state.creations.push(Creation {
            window,
            route_id: request.route_id.to_string(),
            path: request.path.to_string(),
            target: request.target.to_string(),
            options: request.options.clone(),
        });
        Ok(window)
    }

    fn show(&self, window: &MockWindow) {
        self.state.lock().shown.push(*window);
    }

    fn is_destroyed(&self, window: &MockWindow) -> bool {
        self.state.lock().destroyed.contains(window)
    }

    fn content(&self, window: &MockWindow) -> MockContent {
        MockContent { window: *window }
    }

    fn inject_on_first_load(&self, window: &MockWindow, script: String) {
        self.state.lock().scripts.push((*window, script));
    }

    fn on_closed(&self, window: &MockWindow, on_closed: ClosedCallback) {
        self.state.lock().on_closed.insert(*window, on_closed);
    }

    fn open_external(&self, url: &str) -> Result<(), WindowError> {
        let mut state = self.state.lock();
        if state.fail_open {
            return Err(WindowError::open_external(url, "mock opener unavailable"));
        }
        state.external.push(url.to_string());
        Ok(())
    }
}

/// Route logs to the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A manager over a fresh mock host, plus a handle to that host.
pub fn manager_with(
    routes: Vec<RouteConfig<MockHost>>,
) -> (RouteWindowManager<MockHost>, MockHost) {
    init_logging();
    let host = MockHost::new();
    let manager = RouteWindowManager::new(host.clone());
    manager.configure_routes(RoutesConfig::new(BASE_ROUTE).routes(routes));
    (manager, host)
}

/// Single-window route.
pub fn single(path: &str) -> RouteConfig<MockHost> {
    RouteConfig::new(path)
}

/// Multi-window route.
pub fn multiple(path: &str) -> RouteConfig<MockHost> {
    RouteConfig::new(path).multiple_windows(true)
}
