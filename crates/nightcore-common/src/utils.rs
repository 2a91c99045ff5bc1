//! Shared utility functions.

use std::time::Duration;

/// Formats a duration as milliseconds with two decimals, e.g. `12.34`.
pub fn format_millis(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64() * 1000.0)
}

/// Masks a secret for logging, keeping only the first four characters.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let visible: String = secret.chars().take(4).collect();
    if visible.len() == secret.len() {
        "*".repeat(secret.chars().count())
    } else {
        format!("{visible}***")
    }
}
