//! Feature flags: one preset per rule unit.
//!
//! Presets are declared statically and never created or destroyed at runtime;
//! the configuration only toggles them. Declaration order doubles as the
//! precedence order used when two enabled presets claim the same action.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::jobs::{bard, dancer};
use crate::{ActionId, Job};

/// A toggleable feature, bound to exactly one rule unit.
///
/// The variant name is the stable persisted identifier and the name accepted
/// by the command surface (case-insensitive).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Preset {
    // ========================================================================
    // Bard
    // ========================================================================
    BardWanderersPitchPerfectFeature,
    BardStraightShotUpgradeFeature,
    BardIronJawsFeature,
    BardApexFeature,

    // ========================================================================
    // Dancer
    // ========================================================================
    DancerDanceComboCompatibility,
    DancerDanceStepCombo,
    DancerFanDanceCombo,
    DancerSingleTargetMultibutton,
}

/// Static description of a preset for the editor and the resolver index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetInfo {
    pub fancy_name: &'static str,
    pub description: &'static str,
    pub job: Job,
    /// Nominal actions the preset intercepts.
    pub actions: &'static [ActionId],
    /// Hidden from the editor unless secret presets are shown.
    pub secret: bool,
    /// Declared but switched off in code; never evaluated.
    pub dormant: bool,
}

impl Preset {
    pub fn info(self) -> PresetInfo {
        match self {
            Self::BardWanderersPitchPerfectFeature => PresetInfo {
                fancy_name: "Wanderer's Minuet into Pitch Perfect",
                description: "Replaces Wanderer's Minuet with Pitch Perfect while in WM.",
                job: Job::Bard,
                actions: &[bard::WANDERERS_MINUET],
                secret: false,
                dormant: false,
            },
            Self::BardStraightShotUpgradeFeature => PresetInfo {
                fancy_name: "Heavy Shot into Straight Shot",
                description: "Replaces Heavy Shot/Burst Shot with Straight Shot/Refulgent Arrow when procced.",
                job: Job::Bard,
                actions: &[bard::HEAVY_SHOT, bard::BURST_SHOT],
                secret: false,
                dormant: false,
            },
            Self::BardIronJawsFeature => PresetInfo {
                fancy_name: "Iron Jaws Feature",
                description: "Iron Jaws is replaced with Caustic Bite/Stormbite if one or both are not up. \
                              Alternates between the two if Iron Jaws isn't available.",
                job: Job::Bard,
                actions: &[bard::IRON_JAWS],
                secret: false,
                dormant: false,
            },
            Self::BardApexFeature => PresetInfo {
                fancy_name: "Apex Arrow Feature",
                description: "Replaces Quick Nock with Apex Arrow when gauge is full.",
                job: Job::Bard,
                actions: &[bard::QUICK_NOCK],
                secret: true,
                dormant: true,
            },
            Self::DancerDanceComboCompatibility => PresetInfo {
                fancy_name: "Dance Step Combo Compatibility",
                description: "While dancing, replaces four configurable actions with Emboite, \
                              Entrechat, Jete and Pirouette respectively.",
                job: Job::Dancer,
                actions: &dancer::DEFAULT_COMPAT_ACTIONS,
                secret: false,
                dormant: false,
            },
            Self::DancerDanceStepCombo => PresetInfo {
                fancy_name: "Dance Step Combo",
                description: "Change Standard Step and Technical Step into each dance step while dancing.",
                job: Job::Dancer,
                actions: &[dancer::STANDARD_STEP, dancer::TECHNICAL_STEP],
                secret: false,
                dormant: false,
            },
            Self::DancerFanDanceCombo => PresetInfo {
                fancy_name: "Fan Dance Combos",
                description: "Change Fan Dance and Fan Dance 2 into Fan Dance 3 while flourishing.",
                job: Job::Dancer,
                actions: &[dancer::FAN_DANCE, dancer::FAN_DANCE_II],
                secret: false,
                dormant: false,
            },
            Self::DancerSingleTargetMultibutton => PresetInfo {
                fancy_name: "Single Target Multibutton",
                description: "Change Cascade into procs and combos as available.",
                job: Job::Dancer,
                actions: &[dancer::CASCADE],
                secret: true,
                dormant: false,
            },
        }
    }

    /// Bit used for this preset by configurations older than version 4.
    pub const fn legacy_bit(self) -> u32 {
        self as u32
    }

    /// Looks up a preset by its legacy bit index.
    pub fn from_legacy_bit(bit: u32) -> Option<Self> {
        Self::iter().find(|preset| preset.legacy_bit() == bit)
    }
}

/// Presets grouped by job display name, for the toggle list.
///
/// Groups are sorted by job name; presets keep declaration order within a
/// group. Secret presets are left out unless `show_secrets` is set.
pub fn grouped_presets(show_secrets: bool) -> BTreeMap<&'static str, Vec<(Preset, PresetInfo)>> {
    let mut groups: BTreeMap<&'static str, Vec<(Preset, PresetInfo)>> = BTreeMap::new();

    for preset in Preset::iter() {
        let info = preset.info();
        if info.secret && !show_secrets {
            continue;
        }
        groups
            .entry(info.job.display_name())
            .or_default()
            .push((preset, info));
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::EnumCount;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(
            Preset::from_str("bardironjawsfeature").unwrap(),
            Preset::BardIronJawsFeature
        );
        assert_eq!(
            Preset::BardIronJawsFeature.to_string(),
            "BardIronJawsFeature"
        );
        assert!(Preset::from_str("NotAPreset").is_err());
    }

    #[test]
    fn legacy_bits_are_unique() {
        for preset in Preset::iter() {
            assert_eq!(Preset::from_legacy_bit(preset.legacy_bit()), Some(preset));
        }
        assert_eq!(Preset::from_legacy_bit(Preset::COUNT as u32), None);
    }

    #[test]
    fn every_preset_declares_actions() {
        for preset in Preset::iter() {
            assert!(!preset.info().actions.is_empty(), "{preset} has no actions");
        }
    }

    #[test]
    fn grouping_hides_secrets_by_default() {
        let visible = grouped_presets(false);
        let all = grouped_presets(true);

        assert_eq!(visible.keys().copied().collect::<Vec<_>>(), ["Bard", "Dancer"]);
        assert!(
            !visible["Bard"]
                .iter()
                .any(|(preset, _)| *preset == Preset::BardApexFeature)
        );
        assert!(
            all["Bard"]
                .iter()
                .any(|(preset, _)| *preset == Preset::BardApexFeature)
        );

        let total: usize = all.values().map(Vec::len).sum();
        assert_eq!(total, Preset::COUNT);
    }
}
