//! Route window identifiers.
//!
//! Every registered route gets an id of the form
//! `window-<sanitized-path>-<millis>-<12 hex chars>`. The random suffix keeps
//! two ids generated in the same millisecond apart; uniqueness is practical,
//! not guaranteed, and collisions are never checked.

use rand::RngCore;

/// Number of random bytes appended to every id (rendered as hex).
const RANDOM_BYTES: usize = 6;

/// Generate an id for the route registered under `path`.
///
/// # Examples
///
/// ```
/// use routed_windows::id::generate_unique_id;
///
/// let id = generate_unique_id("/dash board!");
/// assert!(id.starts_with("window--dash-board--"));
/// ```
pub fn generate_unique_id(path: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();

    let mut bytes = [0u8; RANDOM_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);

    format!(
        "window-{}-{}-{}",
        sanitize_path(path),
        timestamp,
        to_hex(&bytes)
    )
}

/// Collapse each maximal run of non-word characters into a single `-`.
///
/// Word characters are ASCII letters, digits and `_`.
pub fn sanitize_path(path: &str) -> String {
    let mut sanitized = String::with_capacity(path.len());
    let mut in_run = false;

    for ch in path.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            sanitized.push(ch);
            in_run = false;
        } else if !in_run {
            sanitized.push('-');
            in_run = true;
        }
    }

    sanitized
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_path("/dash board!"), "-dash-board-");
        assert_eq!(sanitize_path("/a//b"), "-a-b");
        assert_eq!(sanitize_path("/users/:id"), "-users-id");
    }

    #[test]
    fn test_sanitize_keeps_word_chars() {
        assert_eq!(sanitize_path("settings_2"), "settings_2");
        assert_eq!(sanitize_path(""), "");
    }

    #[test]
    fn test_sanitize_non_ascii_is_non_word() {
        assert_eq!(sanitize_path("/café"), "-caf-");
    }

    #[test]
    fn test_hex_encoding() {
        assert_eq!(to_hex(&[0x00, 0xab, 0x0f]), "00ab0f");
    }

    #[test]
    fn test_id_shape() {
        let id = generate_unique_id("/dashboard");
        let rest = id.strip_prefix("window--dashboard-").unwrap();
        let (timestamp, hex) = rest.split_once('-').unwrap();

        assert!(!timestamp.is_empty());
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(hex.len(), RANDOM_BYTES * 2);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_differ_within_same_millisecond() {
        fn millis(id: &str) -> &str {
            let rest = id.strip_prefix("window--same-").unwrap();
            rest.split_once('-').unwrap().0
        }

        // Retry until both ids land in the same millisecond, so only the
        // random suffix can tell them apart.
        for _ in 0..1000 {
            let first = generate_unique_id("/same");
            let second = generate_unique_id("/same");
            if millis(&first) == millis(&second) {
                assert_ne!(first, second);
                return;
            }
        }
        panic!("no two ids generated within the same millisecond");
    }
}
