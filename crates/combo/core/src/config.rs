//! Persisted user configuration and the store that shares it.
//!
//! [`ComboConfig`] is the persisted model: which presets are enabled plus the
//! per-preset parameters. [`ConfigStore`] owns the live copy. The resolver only
//! ever reads a snapshot; the editor and the command surface write through
//! [`ConfigStore::update`], and the next resolution sees the change.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use strum::IntoEnumIterator;

use crate::jobs::dancer;
use crate::{ActionId, Preset};

/// Schema version written by this build.
pub const CURRENT_CONFIG_VERSION: u32 = 4;

/// User configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboConfig {
    /// Schema version the configuration was written with. Files without a
    /// version predate versioning and are treated as version 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: u32,

    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "serde_support::lenient_presets")
    )]
    pub enabled_presets: BTreeSet<Preset>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub enable_secret_combos: bool,

    /// Actions remapped to Emboite, Entrechat, Jete and Pirouette.
    #[cfg_attr(
        feature = "serde",
        serde(default = "serde_support::default_compat_action_ids")
    )]
    pub dancer_dance_compat_action_ids: [ActionId; 4],

    /// Bitmask of enabled presets used before version 4.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub legacy_presets: Option<u64>,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            enabled_presets: BTreeSet::new(),
            enable_secret_combos: false,
            dancer_dance_compat_action_ids: dancer::DEFAULT_COMPAT_ACTIONS,
            legacy_presets: None,
        }
    }
}

impl ComboConfig {
    pub fn is_enabled(&self, preset: Preset) -> bool {
        self.enabled_presets.contains(&preset)
    }

    /// Enables a preset. Returns false if it was already enabled.
    pub fn enable(&mut self, preset: Preset) -> bool {
        self.enabled_presets.insert(preset)
    }

    /// Disables a preset. Returns false if it was already disabled.
    pub fn disable(&mut self, preset: Preset) -> bool {
        self.enabled_presets.remove(&preset)
    }

    /// Flips a preset and returns its new state.
    pub fn toggle(&mut self, preset: Preset) -> bool {
        if self.disable(preset) {
            false
        } else {
            self.enable(preset)
        }
    }

    pub fn enable_all(&mut self) {
        self.enabled_presets.extend(Preset::iter());
    }

    pub fn disable_all(&mut self) {
        self.enabled_presets.clear();
    }

    pub fn needs_upgrade(&self) -> bool {
        self.version < CURRENT_CONFIG_VERSION
    }

    /// Upgrades an older configuration to [`CURRENT_CONFIG_VERSION`].
    ///
    /// One-way: configurations written by a newer build are left untouched.
    /// Returns true if anything changed and the result should be saved.
    pub fn upgrade(&mut self) -> bool {
        if !self.needs_upgrade() {
            return false;
        }

        let from = self.version;

        if let Some(bits) = self.legacy_presets.take() {
            for bit in 0..u64::BITS {
                if bits & (1 << bit) == 0 {
                    continue;
                }
                match Preset::from_legacy_bit(bit) {
                    Some(preset) => {
                        self.enabled_presets.insert(preset);
                    }
                    None => tracing::warn!(bit, "dropping unknown legacy preset bit"),
                }
            }
        }

        if self
            .dancer_dance_compat_action_ids
            .iter()
            .all(|id| id.get() == 0)
        {
            self.dancer_dance_compat_action_ids = dancer::DEFAULT_COMPAT_ACTIONS;
        }

        self.version = CURRENT_CONFIG_VERSION;
        tracing::info!(
            from,
            to = CURRENT_CONFIG_VERSION,
            enabled = self.enabled_presets.len(),
            "upgraded combo configuration"
        );
        true
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer};

    use crate::jobs::dancer;
    use crate::{ActionId, Preset};

    pub(super) fn default_compat_action_ids() -> [ActionId; 4] {
        dancer::DEFAULT_COMPAT_ACTIONS
    }

    /// Reads preset names, skipping ones this build no longer knows.
    pub(super) fn lenient_presets<'de, D>(deserializer: D) -> Result<BTreeSet<Preset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names
            .iter()
            .filter_map(|name| match Preset::from_str(name) {
                Ok(preset) => Some(preset),
                Err(_) => {
                    tracing::warn!(name = %name, "ignoring unknown preset in configuration");
                    None
                }
            })
            .collect())
    }
}

/// Process-owned configuration shared by the resolver and the editor.
///
/// Readers take an [`Arc`] snapshot and never observe a partial update.
/// Writers copy-modify-replace under the lock, so snapshots handed out
/// earlier stay unchanged.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: RwLock<Arc<ComboConfig>>,
}

impl ConfigStore {
    pub fn new(config: ComboConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Returns the current configuration.
    pub fn snapshot(&self) -> Arc<ComboConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Applies `f` to the configuration and publishes the result.
    pub fn update<R>(&self, f: impl FnOnce(&mut ComboConfig) -> R) -> R {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        f(Arc::make_mut(&mut guard))
    }

    /// Replaces the whole configuration.
    pub fn replace(&self, config: ComboConfig) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }
}
