//! The rule unit contract.
//!
//! A rule is one stateless decision function bound to a [`Preset`]. It looks at
//! the nominal action and the telemetry exposed by [`RuleContext`] and returns
//! either the nominal action (no change) or a replacement.

use crate::telemetry::{CombatOracle, ComboState, Gauge, StatusEffect};
use crate::{ActionId, ComboConfig, EffectId, Preset};

/// A rule unit that may substitute one action for another.
///
/// # Implementation Rules
/// 1. Rules MUST NOT hold mutable state across calls
/// 2. Rules MUST return identical output for identical context
/// 3. Rules return `ctx.action` when they have nothing better to offer
/// 4. Rules only read telemetry of their own preset's job
pub trait ComboRule: Send + Sync {
    /// Feature flag controlling this rule.
    fn preset(&self) -> Preset;

    /// Whether this rule declares interest in `action`.
    ///
    /// The default reads the preset's static action list.
    fn claims(&self, action: ActionId, _config: &ComboConfig) -> bool {
        self.preset().info().actions.contains(&action)
    }

    /// True if [`ComboRule::claims`] depends on configuration parameters
    /// rather than the static action list.
    fn parameterized(&self) -> bool {
        false
    }

    /// Decides the action to execute.
    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId;
}

/// Inputs for one rule evaluation.
///
/// The nominal action, combo state and level are captured once per
/// resolution; the remaining telemetry is queried through the oracle.
pub struct RuleContext<'a> {
    /// Action the player triggered.
    pub action: ActionId,
    pub combo: ComboState,
    pub level: u8,
    oracle: &'a dyn CombatOracle,
    config: &'a ComboConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(action: ActionId, oracle: &'a dyn CombatOracle, config: &'a ComboConfig) -> Self {
        Self {
            action,
            combo: oracle.combo(),
            level: oracle.level(),
            oracle,
            config,
        }
    }

    pub fn config(&self) -> &'a ComboConfig {
        self.config
    }

    /// Whether the player carries the buff.
    pub fn has_effect(&self, effect: EffectId) -> bool {
        self.oracle.has_self_buff(effect)
    }

    /// The effect on the current target, if present with a positive duration.
    pub fn find_target_effect(&self, effect: EffectId) -> Option<StatusEffect> {
        self.oracle
            .target_effect(effect)
            .filter(StatusEffect::is_active)
    }

    /// Presence-only variant of [`Self::find_target_effect`].
    pub fn target_has_effect(&self, effect: EffectId) -> bool {
        self.find_target_effect(effect).is_some()
    }

    /// Currently unlocked tier of an ability slot.
    pub fn resolved_form(&self, action: ActionId) -> ActionId {
        self.oracle.resolved_form(action)
    }

    /// The current job's gauge as `G`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the telemetry gauge belongs to another job.
    /// The resolver only runs rules of the player's current job, so this only
    /// fires when a host reports a gauge that contradicts its own job.
    /// Release builds log the violation and return `None`. A host that
    /// reports no gauge at all also yields `None`.
    pub fn gauge<G: Gauge>(&self) -> Option<G> {
        let gauge = self.oracle.gauge();
        let extracted = G::from_job_gauge(&gauge);
        if extracted.is_none() && !gauge.is_none() {
            tracing::error!(
                expected = %G::JOB,
                actual = ?gauge.job(),
                "gauge requested for the wrong job"
            );
            debug_assert!(
                false,
                "gauge for {} requested but telemetry reports {:?}",
                G::JOB,
                gauge.job()
            );
        }
        extracted
    }
}
