//! Scripts injected into routed windows.
//!
//! Two assets live here:
//!
//! - the **click listener**, run in every routed window after its first
//!   load. It intercepts clicks on `a[target="_blank"]`, stops the webview
//!   from navigating, and forwards the `href` to the host through the
//!   bridge: external schemes (see [`EXTERNAL_SCHEMES`]) on
//!   [`OPEN_EXTERNAL_CHANNEL`], everything else on [`OPEN_WINDOW_CHANNEL`].
//! - the **bridge**, which a host binding installs before page scripts run
//!   to provide `window.<bridge>.sendMessage(channel, payload)`.
//!
//! [`init_script`] joins the two so a host binding can install both in every
//! webview, the application's main window included. The listener's version
//! guard keeps the later first-load injection in routed windows a no-op.
//!
//! The listener depends only on the bridge object. When the bridge is
//! missing the click is still swallowed but nothing is sent.
//!
//! [`EXTERNAL_SCHEMES`]: crate::message::EXTERNAL_SCHEMES

use crate::message::{EXTERNAL_SCHEMES, OPEN_EXTERNAL_CHANNEL, OPEN_WINDOW_CHANNEL};

/// Bumped whenever the listener's observable behaviour changes.
pub const LISTENER_VERSION: u32 = 1;

/// Global object name the listener expects the bridge under.
pub const DEFAULT_BRIDGE: &str = "routedWindowsApi";

const LISTENER_TEMPLATE: &str = r#"(function () {
  if (window.__routedWindowsListener === __VERSION__) {
    return;
  }
  window.__routedWindowsListener = __VERSION__;
  var externalLink = new RegExp(__EXTERNAL_PATTERN__);
  document.addEventListener('click', function (event) {
    var target = null;
    if (event.target instanceof Element) {
      target = event.target.closest('a[target="_blank"]');
    }
    if (!target) {
      return;
    }
    event.preventDefault();
    var href = target.getAttribute('href') || '';
    var bridge = window[__BRIDGE__];
    if (!bridge || typeof bridge.sendMessage !== 'function') {
      return;
    }
    if (externalLink.test(href)) {
      bridge.sendMessage(__EXTERNAL_CHANNEL__, href);
    } else {
      bridge.sendMessage(__WINDOW_CHANNEL__, href);
    }
  });
})();
"#;

/// Render the click listener for a bridge object named `bridge`.
///
/// # Examples
///
/// ```
/// use routed_windows::script::{listener_script, DEFAULT_BRIDGE};
///
/// let script = listener_script(DEFAULT_BRIDGE);
/// assert!(script.contains("\"routedWindowsApi\""));
/// ```
pub fn listener_script(bridge: &str) -> String {
    LISTENER_TEMPLATE
        .replace("__VERSION__", &LISTENER_VERSION.to_string())
        .replace("__EXTERNAL_PATTERN__", &js_string(&external_pattern()))
        .replace("__BRIDGE__", &js_string(bridge))
        .replace("__EXTERNAL_CHANNEL__", &js_string(OPEN_EXTERNAL_CHANNEL))
        .replace("__WINDOW_CHANNEL__", &js_string(OPEN_WINDOW_CHANNEL))
}

/// Render a bridge that forwards `sendMessage(channel, payload)` to
/// `invoke_expr`, a JS expression evaluating to `(channel, payload) => ...`.
///
/// Existing bridges are left untouched.
pub fn bridge_script(bridge: &str, invoke_expr: &str) -> String {
    format!(
        "(function () {{\n  if (window[{name}]) {{\n    return;\n  }}\n  var send = {invoke};\n  \
         Object.defineProperty(window, {name}, {{\n    value: Object.freeze({{\n      \
         sendMessage: function (channel, payload) {{\n        return send(channel, payload);\n      \
         }}\n    }})\n  }});\n}})();\n",
        name = js_string(bridge),
        invoke = invoke_expr,
    )
}

/// Render the bridge followed by the click listener, for installation
/// before page scripts run.
pub fn init_script(bridge: &str, invoke_expr: &str) -> String {
    let mut script = bridge_script(bridge, invoke_expr);
    script.push_str(&listener_script(bridge));
    script
}

/// The anchored alternation used to recognise external links,
/// e.g. `^(http:|https:|mailto:|ftp:)`.
pub fn external_pattern() -> String {
    format!("^({})", EXTERNAL_SCHEMES.join("|"))
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    // A JSON string is a valid JS string literal.
    serde_json::Value::String(value.to_string()).to_string()
}
