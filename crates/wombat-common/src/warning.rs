//! Compiler warnings with colored terminal output.
//!
//! The selector compiler drops some constructs instead of failing the whole
//! compile (unknown pseudo-classes, `:not()` arguments it cannot express).
//! Dropping silently hides bugs in caller-supplied selectors, so each drop
//! is reported here - once per unique message, since the same selector is
//! typically compiled over and over.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Messages already printed, kept for process lifetime to deduplicate.
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Warn about an unsupported construct (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("CSS", "dropping unsupported pseudo-class ':hover'");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED.lock().unwrap().insert(key);

    if first_time {
        eprintln!("{YELLOW}[Wombat {component}] ⚠ {message}{RESET}");
    }
}

/// Forget all recorded warnings (call between unrelated selector batches)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    WARNED.lock().unwrap().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        clear_warnings();
        warn_once("CSS", "test message");
        let repeated = WARNED.lock().unwrap().insert("[CSS] test message".to_string());
        assert!(!repeated);
    }
}
