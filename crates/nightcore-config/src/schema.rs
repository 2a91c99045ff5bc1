//! Runtime configuration schema read from `nightcore.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Non-secret runtime options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Which features and cog categories are loaded.
    pub extensions: ExtensionToggles,
    /// HTTP transport tuning for the Discord client.
    pub transport: TransportConfig,
}

/// Enable flags for features and cog categories.
///
/// Names missing from a map are treated as disabled. When deserialized, the
/// given entries are laid over the defaults, so a file only needs to list
/// what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ToggleOverrides")]
pub struct ExtensionToggles {
    /// Feature name (e.g. `meta`) to enabled flag.
    pub features: BTreeMap<String, bool>,
    /// Category name (e.g. `events`, `tasks`) to enabled flag.
    pub categories: BTreeMap<String, bool>,
}

impl ExtensionToggles {
    /// Whether the named feature is enabled.
    pub fn feature_enabled(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    /// Whether the named cog category is enabled.
    pub fn category_enabled(&self, name: &str) -> bool {
        self.categories.get(name).copied().unwrap_or(false)
    }

    /// Sets a feature flag, returning `self` for chaining.
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(name.into(), enabled);
        self
    }

    /// Sets a category flag, returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.categories.insert(name.into(), enabled);
        self
    }
}

/// Partial toggles as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToggleOverrides {
    features: BTreeMap<String, bool>,
    categories: BTreeMap<String, bool>,
}

impl From<ToggleOverrides> for ExtensionToggles {
    fn from(overrides: ToggleOverrides) -> Self {
        let mut toggles = Self::default();
        toggles.features.extend(overrides.features);
        toggles.categories.extend(overrides.categories);
        toggles
    }
}

/// HTTP transport options for the Discord client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Maximum idle connections kept per host.
    pub pool_limit: usize,
    /// How long resolved DNS entries are reused, in seconds.
    pub dns_cache_ttl_secs: u64,
    /// Idle connection and TCP keep-alive duration, in seconds.
    pub keepalive_secs: u64,
    /// Upper bound for the gateway discovery request, in seconds.
    pub gateway_timeout_secs: u64,
    /// Upper bound for the command synchronization request, in seconds.
    pub sync_timeout_secs: u64,
}

impl TransportConfig {
    /// DNS cache lifetime.
    pub const fn dns_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.dns_cache_ttl_secs)
    }

    /// Keep-alive duration.
    pub const fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }

    /// Gateway discovery timeout.
    pub const fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    /// Command synchronization timeout.
    pub const fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }
}
