//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so that a selector list repeating the same
//! unstructured construct reports it once. Used by the CSS crate to flag
//! functional pseudo-class arguments that are kept as raw tokens.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate).
///
/// Grows by one entry per distinct message for the life of the process; a
/// long-running caller that parses untrusted input should call
/// [`clear_warnings`] between inputs.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are written to stderr at all.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about accepted-but-unstructured input (prints once per unique message).
///
/// Returns `true` if this is the first time the message was recorded. Every
/// distinct message stays recorded until [`clear_warnings`].
/// Recording still happens while output is disabled, so a later
/// [`set_enabled`]`(true)` does not replay old messages.
///
/// # Example
/// ```ignore
/// warn_once("Selectors", "arguments to :contains() kept as raw tokens");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[sift {component}] ⚠ {message}").yellow());
    }
    first
}

/// Enable or disable warning output (the CLI's `--quiet` flag).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Clear all recorded warnings (call between independent inputs).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
