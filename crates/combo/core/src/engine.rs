//! Host-facing entry point.

use std::sync::Arc;

use crate::telemetry::CombatOracle;
use crate::{ActionId, ComboCommand, ComboConfig, ComboResolver, CommandOutcome, ConfigStore};

/// Resolver bound to the live configuration.
///
/// The host calls [`ComboEngine::resolve`] for every player-triggered action
/// and routes text commands through [`ComboEngine::execute`]. Each resolution
/// reads one configuration snapshot, so a concurrent edit is observed either
/// entirely or not at all.
pub struct ComboEngine {
    resolver: ComboResolver,
    store: Arc<ConfigStore>,
}

impl ComboEngine {
    pub fn new(resolver: ComboResolver, store: Arc<ConfigStore>) -> Self {
        Self { resolver, store }
    }

    /// Engine with the built-in rules over `config`.
    pub fn with_config(config: ComboConfig) -> Self {
        Self::new(
            ComboResolver::with_default_rules(),
            Arc::new(ConfigStore::new(config)),
        )
    }

    pub fn config(&self) -> Arc<ComboConfig> {
        self.store.snapshot()
    }

    /// Returns the action to execute in place of `action`.
    pub fn resolve(&self, action: ActionId, oracle: &dyn CombatOracle) -> ActionId {
        let config = self.store.snapshot();
        self.resolver.resolve(action, oracle, &config)
    }

    /// Applies a text command to the live configuration.
    pub fn execute(&self, command: &ComboCommand) -> CommandOutcome {
        command.apply(&self.store)
    }
}

impl Default for ComboEngine {
    fn default() -> Self {
        Self::with_config(ComboConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::bard;
    use crate::{Job, Preset, TelemetrySnapshot};

    #[test]
    fn commands_take_effect_on_next_resolution() {
        let engine = ComboEngine::default();
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);

        assert_eq!(engine.resolve(bard::IRON_JAWS, &snapshot), bard::IRON_JAWS);

        let outcome = engine.execute(&ComboCommand::Set(Preset::BardIronJawsFeature));
        assert!(outcome.changed);
        assert_eq!(engine.resolve(bard::IRON_JAWS, &snapshot), bard::STORMBITE);

        engine.execute(&ComboCommand::Unset(Preset::BardIronJawsFeature));
        assert_eq!(engine.resolve(bard::IRON_JAWS, &snapshot), bard::IRON_JAWS);
    }

    #[test]
    fn shared_store_is_visible_to_engine() {
        let store = Arc::new(ConfigStore::default());
        let engine = ComboEngine::new(ComboResolver::with_default_rules(), Arc::clone(&store));

        store.update(|config| config.enable(Preset::BardApexFeature));
        assert!(engine.config().is_enabled(Preset::BardApexFeature));
    }
}
