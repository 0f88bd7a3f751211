//! Navigation target composition.
//!
//! A routed window loads the application's entry document with the route in
//! the URL fragment, so a hash-based router inside the page renders the
//! route on its own:
//!
//! | base route              | path         | target                          |
//! |-------------------------|--------------|---------------------------------|
//! | `index.html`            | `/dashboard` | `index.html#/dashboard`         |
//! | `https://app.local/`    | `/settings`  | `https://app.local/#/settings`  |
//! | `index.html#`           | `/about`     | `index.html#/about`             |
//! | `index.html`            | (empty)      | `index.html`                    |
//!
//! Any fragment already present on the base is replaced.

/// Compose the URL a routed window for `path` should load.
///
/// # Examples
///
/// ```
/// use routed_windows::target::compose_target;
///
/// assert_eq!(compose_target("index.html", "/dashboard"), "index.html#/dashboard");
/// ```
pub fn compose_target(base_route: &str, path: &str) -> String {
    let base = strip_fragment(base_route);

    if path.is_empty() {
        return base.to_string();
    }

    let fragment = path.strip_prefix('#').unwrap_or(path);
    format!("{}#{}", base, fragment)
}

fn strip_fragment(base_route: &str) -> &str {
    base_route
        .split_once('#')
        .map_or(base_route, |(base, _)| base)
}
