//! Integration tests for nightcore-common crate.

use nightcore_common::{format_millis, ExtensionId, NightcoreError};
use std::time::Duration;

#[test]
fn test_extension_id_display() {
    let id = ExtensionId::new("features.meta.commands.ping");
    assert_eq!(format!("{id}"), "features.meta.commands.ping");
    assert_eq!(id.as_str(), "features.meta.commands.ping");
}

#[test]
fn test_extension_id_conversions() {
    let from_str: ExtensionId = "events.on_message".into();
    let from_string: ExtensionId = String::from("events.on_message").into();
    assert_eq!(from_str, from_string);
}

#[test]
fn test_format_millis() {
    assert_eq!(format_millis(Duration::from_millis(250)), "250.00");
}

#[test]
fn test_error_messages() {
    let err = NightcoreError::config("BOT_TOKEN missing");
    assert!(matches!(err, NightcoreError::Config(_)));
    assert_eq!(err.to_string(), "Configuration error: BOT_TOKEN missing");
    assert_eq!(
        NightcoreError::Startup("extensions already loaded".to_string()).to_string(),
        "Startup error: extensions already loaded"
    );
}
