//! Rule registry and dispatcher.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::telemetry::CombatOracle;
use crate::{ActionId, ComboConfig, ComboRule, RuleContext, jobs};

/// Registry that selects and evaluates the rules relevant to one action.
///
/// Rules are kept in declaration order, which is also their precedence. An
/// index from nominal action to rule slots is built once so that the common
/// case, an action nobody intercepts, costs a single lookup.
///
/// # Resolution
///
/// 1. Collect the rules that claim the action
/// 2. Keep those that are enabled, not dormant and belong to the current job
/// 3. Evaluate them in precedence order and return the first substitution
/// 4. Fall back to the nominal action
///
/// A rule's output is never fed into another rule.
pub struct ComboResolver {
    rules: Arc<[Arc<dyn ComboRule>]>,
    /// Static action -> rule slots, ascending.
    index: HashMap<ActionId, Vec<usize>>,
    /// Slots whose claims depend on configuration.
    parameterized: Vec<usize>,
}

impl ComboResolver {
    /// Creates a resolver over `rules`, in precedence order.
    ///
    /// # Panics
    ///
    /// Panics if two rules share a preset. Each preset controls exactly one
    /// rule; a duplicate is a programming error.
    pub fn new(rules: Vec<Arc<dyn ComboRule>>) -> Self {
        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            assert!(
                seen.insert(rule.preset()),
                "preset {} is bound to more than one rule",
                rule.preset()
            );
        }

        let mut index: HashMap<ActionId, Vec<usize>> = HashMap::new();
        let mut parameterized = Vec::new();

        for (slot, rule) in rules.iter().enumerate() {
            if rule.parameterized() {
                parameterized.push(slot);
                continue;
            }
            for &action in rule.preset().info().actions {
                let slots = index.entry(action).or_default();
                if !slots.contains(&slot) {
                    slots.push(slot);
                }
            }
        }

        Self {
            rules: rules.into(),
            index,
            parameterized,
        }
    }

    /// Creates a resolver with every built-in rule.
    pub fn with_default_rules() -> Self {
        Self::new(jobs::default_rules())
    }

    /// Rules that would be evaluated for `action`, in precedence order.
    pub fn candidates(
        &self,
        action: ActionId,
        oracle: &dyn CombatOracle,
        config: &ComboConfig,
    ) -> Vec<Arc<dyn ComboRule>> {
        let job = oracle.job();
        let static_slots = self.index.get(&action).map(Vec::as_slice).unwrap_or(&[]);
        let dynamic_slots = self
            .parameterized
            .iter()
            .copied()
            .filter(|&slot| self.rules[slot].claims(action, config));

        let mut slots: Vec<usize> = static_slots.iter().copied().chain(dynamic_slots).collect();
        if slots.is_empty() {
            return Vec::new();
        }
        slots.sort_unstable();

        slots
            .into_iter()
            .map(|slot| &self.rules[slot])
            .filter(|rule| {
                let preset = rule.preset();
                let info = preset.info();
                if !config.is_enabled(preset) {
                    return false;
                }
                if info.dormant {
                    debug!(%preset, "skipping dormant preset");
                    return false;
                }
                if job != Some(info.job) {
                    debug!(%preset, ?job, "skipping preset for another job");
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }

    /// Returns the action that should be executed for `action`.
    pub fn resolve(
        &self,
        action: ActionId,
        oracle: &dyn CombatOracle,
        config: &ComboConfig,
    ) -> ActionId {
        let candidates = self.candidates(action, oracle, config);
        if candidates.is_empty() {
            return action;
        }

        let ctx = RuleContext::new(action, oracle, config);
        for rule in &candidates {
            let resolved = rule.evaluate(&ctx);
            if resolved != action {
                debug!(
                    preset = %rule.preset(),
                    nominal = %action,
                    %resolved,
                    "substituted action"
                );
                return resolved;
            }
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::bard;
    use crate::{Job, Preset, TelemetrySnapshot};

    /// Maps one action to another, unconditionally.
    struct Fixed {
        preset: Preset,
        from: ActionId,
        to: ActionId,
    }

    impl ComboRule for Fixed {
        fn preset(&self) -> Preset {
            self.preset
        }

        fn claims(&self, action: ActionId, _config: &ComboConfig) -> bool {
            action == self.from
        }

        fn parameterized(&self) -> bool {
            true
        }

        fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
            if ctx.action == self.from { self.to } else { ctx.action }
        }
    }

    fn fixed(preset: Preset, from: u32, to: u32) -> Arc<dyn ComboRule> {
        Arc::new(Fixed {
            preset,
            from: ActionId(from),
            to: ActionId(to),
        })
    }

    fn enabled(presets: &[Preset]) -> ComboConfig {
        let mut config = ComboConfig::default();
        for &preset in presets {
            config.enable(preset);
        }
        config
    }

    #[test]
    fn unknown_action_passes_through() {
        let resolver = ComboResolver::with_default_rules();
        let mut config = ComboConfig::default();
        config.enable_all();
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);

        assert_eq!(resolver.resolve(ActionId(1), &snapshot, &config), ActionId(1));
    }

    #[test]
    fn disabled_rule_is_not_evaluated() {
        let resolver = ComboResolver::with_default_rules();
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);

        assert_eq!(
            resolver.resolve(bard::IRON_JAWS, &snapshot, &ComboConfig::default()),
            bard::IRON_JAWS
        );
        assert_eq!(
            resolver.resolve(
                bard::IRON_JAWS,
                &snapshot,
                &enabled(&[Preset::BardIronJawsFeature])
            ),
            bard::STORMBITE
        );
    }

    #[test]
    fn rules_for_other_jobs_are_skipped() {
        let resolver = ComboResolver::with_default_rules();
        let config = enabled(&[Preset::BardIronJawsFeature]);
        let dancer = TelemetrySnapshot::new(Job::Dancer, 80);
        let jobless = TelemetrySnapshot::default();

        assert_eq!(resolver.resolve(bard::IRON_JAWS, &dancer, &config), bard::IRON_JAWS);
        assert_eq!(resolver.resolve(bard::IRON_JAWS, &jobless, &config), bard::IRON_JAWS);
    }

    #[test]
    fn dormant_preset_is_never_evaluated() {
        let resolver = ComboResolver::new(vec![fixed(Preset::BardApexFeature, 106, 16496)]);
        let config = enabled(&[Preset::BardApexFeature]);
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);

        assert_eq!(resolver.resolve(ActionId(106), &snapshot, &config), ActionId(106));
    }

    #[test]
    fn first_substitution_in_declaration_order_wins() {
        let resolver = ComboResolver::new(vec![
            fixed(Preset::BardWanderersPitchPerfectFeature, 10, 11),
            fixed(Preset::BardStraightShotUpgradeFeature, 10, 12),
        ]);
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);
        let both = enabled(&[
            Preset::BardWanderersPitchPerfectFeature,
            Preset::BardStraightShotUpgradeFeature,
        ]);
        let second_only = enabled(&[Preset::BardStraightShotUpgradeFeature]);

        assert_eq!(resolver.resolve(ActionId(10), &snapshot, &both), ActionId(11));
        assert_eq!(resolver.resolve(ActionId(10), &snapshot, &second_only), ActionId(12));
    }

    #[test]
    fn identity_result_falls_through_to_next_rule() {
        let resolver = ComboResolver::new(vec![
            fixed(Preset::BardWanderersPitchPerfectFeature, 10, 10),
            fixed(Preset::BardStraightShotUpgradeFeature, 10, 12),
        ]);
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);
        let config = enabled(&[
            Preset::BardWanderersPitchPerfectFeature,
            Preset::BardStraightShotUpgradeFeature,
        ]);

        assert_eq!(resolver.resolve(ActionId(10), &snapshot, &config), ActionId(12));
    }

    #[test]
    fn output_is_not_resolved_again() {
        let resolver = ComboResolver::new(vec![
            fixed(Preset::BardWanderersPitchPerfectFeature, 1, 2),
            fixed(Preset::BardStraightShotUpgradeFeature, 2, 3),
        ]);
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80);
        let config = enabled(&[
            Preset::BardWanderersPitchPerfectFeature,
            Preset::BardStraightShotUpgradeFeature,
        ]);

        assert_eq!(resolver.resolve(ActionId(1), &snapshot, &config), ActionId(2));
        assert_eq!(resolver.resolve(ActionId(2), &snapshot, &config), ActionId(3));
    }

    #[test]
    #[should_panic(expected = "bound to more than one rule")]
    fn duplicate_preset_is_rejected() {
        ComboResolver::new(vec![
            fixed(Preset::BardIronJawsFeature, 1, 2),
            fixed(Preset::BardIronJawsFeature, 3, 4),
        ]);
    }

    #[test]
    fn candidates_follow_precedence() {
        let resolver = ComboResolver::with_default_rules();
        let mut config = ComboConfig::default();
        config.enable_all();
        let snapshot = TelemetrySnapshot::new(Job::Dancer, 80);

        let presets: Vec<Preset> = resolver
            .candidates(crate::jobs::dancer::FAN_DANCE, &snapshot, &config)
            .iter()
            .map(|rule| rule.preset())
            .collect();

        assert_eq!(
            presets,
            [Preset::DancerDanceComboCompatibility, Preset::DancerFanDanceCombo]
        );
    }
}
