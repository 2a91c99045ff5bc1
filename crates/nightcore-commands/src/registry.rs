//! Composition of the per-feature and per-category extension lists.

use crate::{events, features, tasks};
use nightcore_common::ExtensionId;
use nightcore_config::ExtensionToggles;

/// Pure accessor returning an ordered list of extension identifiers.
pub type ExtensionSource = fn() -> Vec<ExtensionId>;

/// Category name of event cogs in [`ExtensionToggles::categories`].
pub const EVENTS_CATEGORY: &str = "events";

/// Category name of task cogs in [`ExtensionToggles::categories`].
pub const TASKS_CATEGORY: &str = "tasks";

/// A named feature and the accessor for its cogs.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSource {
    /// Feature name, as used in [`ExtensionToggles::features`].
    pub name: &'static str,
    /// Accessor for the feature's cogs.
    pub extensions: ExtensionSource,
}

/// Every extension source known to the bot.
#[derive(Debug, Clone)]
pub struct ExtensionCatalog {
    /// Feature sources, in load order.
    pub features: Vec<FeatureSource>,
    /// Event cogs.
    pub events: ExtensionSource,
    /// Task cogs.
    pub tasks: ExtensionSource,
}

impl ExtensionCatalog {
    /// Catalog of the sources shipped in this crate.
    pub fn builtin() -> Self {
        Self {
            features: vec![FeatureSource {
                name: "meta",
                extensions: features::meta::extensions,
            }],
            events: events::extensions,
            tasks: tasks::extensions,
        }
    }
}

/// Flattens the enabled sources into one load list.
///
/// Order: feature cogs in catalog order, then event cogs, then task cogs.
/// Disabled sources contribute nothing.
pub fn collect_extensions(toggles: &ExtensionToggles, catalog: &ExtensionCatalog) -> Vec<ExtensionId> {
    let mut modules = Vec::new();

    for feature in &catalog.features {
        if toggles.feature_enabled(feature.name) {
            modules.extend((feature.extensions)());
        }
    }

    if toggles.category_enabled(EVENTS_CATEGORY) {
        modules.extend((catalog.events)());
    }

    if toggles.category_enabled(TASKS_CATEGORY) {
        modules.extend((catalog.tasks)());
    }

    modules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::meta::commands::ping;

    #[test]
    fn test_builtin_defaults_load_ping() {
        let modules = collect_extensions(&ExtensionToggles::default(), &ExtensionCatalog::builtin());
        assert_eq!(modules, vec![ExtensionId::new(ping::EXTENSION_ID)]);
    }

    #[test]
    fn test_disabled_feature_contributes_nothing() {
        let toggles = ExtensionToggles::default().with_feature("meta", false);
        let modules = collect_extensions(&toggles, &ExtensionCatalog::builtin());
        assert!(modules.is_empty());
    }
}
