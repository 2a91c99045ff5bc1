//! Default values for the runtime configuration.

use crate::schema::{ExtensionToggles, TransportConfig};
use std::collections::BTreeMap;

/// Features enabled out of the box.
pub const DEFAULT_FEATURES: &[(&str, bool)] = &[("meta", true)];

/// Cog categories enabled out of the box.
pub const DEFAULT_CATEGORIES: &[(&str, bool)] =
    &[("events", true), ("tasks", true)];

impl Default for ExtensionToggles {
    fn default() -> Self {
        Self {
            features: to_map(DEFAULT_FEATURES),
            categories: to_map(DEFAULT_CATEGORIES),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pool_limit: 100,
            dns_cache_ttl_secs: 300,
            keepalive_secs: 60,
            gateway_timeout_secs: 10,
            sync_timeout_secs: 30,
        }
    }
}

fn to_map(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries
        .iter()
        .map(|(name, enabled)| ((*name).to_string(), *enabled))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_toggles() {
        let toggles = ExtensionToggles::default();
        assert!(toggles.feature_enabled("meta"));
        assert!(toggles.category_enabled("events"));
        assert!(toggles.category_enabled("tasks"));
        assert!(!toggles.feature_enabled("music"));
    }

    #[test]
    fn test_default_transport() {
        let transport = TransportConfig::default();
        assert_eq!(transport.pool_limit, 100);
        assert_eq!(transport.dns_cache_ttl(), Duration::from_secs(300));
        assert_eq!(transport.keepalive(), Duration::from_secs(60));
        assert_eq!(transport.gateway_timeout(), Duration::from_secs(10));
        assert_eq!(transport.sync_timeout(), Duration::from_secs(30));
    }
}
