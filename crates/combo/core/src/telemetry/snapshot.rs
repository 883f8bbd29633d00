//! Serializable telemetry snapshot.
//!
//! [`TelemetrySnapshot`] captures everything a resolution reads and implements
//! [`CombatOracle`] on top of it. Hosts can build one per input event; tests
//! and replay files use it as the fake telemetry feed.

use crate::telemetry::{CombatOracle, ComboState, JobGauge, StatusEffect, TelemetryError};
use crate::{ActionId, EffectId, Job, jobs};

/// Host-reported upgrade of one ability slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormOverride {
    pub action: ActionId,
    pub resolved: ActionId,
}

/// Frozen combat state for one resolution.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetrySnapshot {
    pub job: Option<Job>,
    pub level: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combo: ComboState,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "JobGauge::is_none")
    )]
    pub gauge: JobGauge,
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_buffs: Vec<EffectId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_effects: Vec<StatusEffect>,
    /// Host-reported tiers. Slots not listed follow the level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resolved_forms: Vec<FormOverride>,
}

impl TelemetrySnapshot {
    /// Highest character level a snapshot may report.
    pub const MAX_LEVEL: u8 = 100;

    pub fn new(job: Job, level: u8) -> Self {
        Self {
            job: Some(job),
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_gauge(mut self, gauge: JobGauge) -> Self {
        self.gauge = gauge;
        self
    }

    #[must_use]
    pub fn with_buff(mut self, effect: EffectId) -> Self {
        self.self_buffs.push(effect);
        self
    }

    #[must_use]
    pub fn with_target_effect(mut self, effect: EffectId, remaining: f32) -> Self {
        self.target_effects.retain(|e| e.id != effect);
        self.target_effects.push(StatusEffect::new(effect, remaining));
        self
    }

    #[must_use]
    pub fn with_combo(mut self, last_action: ActionId, elapsed: f32) -> Self {
        self.combo = ComboState::new(last_action, elapsed);
        self
    }

    #[must_use]
    pub fn with_form(mut self, action: ActionId, resolved: ActionId) -> Self {
        self.resolved_forms.retain(|f| f.action != action);
        self.resolved_forms.push(FormOverride { action, resolved });
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Checks the snapshot for values no real telemetry feed would produce.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.level == 0 || self.level > Self::MAX_LEVEL {
            return Err(TelemetryError::LevelOutOfRange {
                level: self.level,
                max: Self::MAX_LEVEL,
            });
        }

        if let (Some(job), Some(gauge)) = (self.job, self.gauge.job())
            && job != gauge
        {
            return Err(TelemetryError::GaugeJobMismatch { job, gauge });
        }

        for (i, effect) in self.target_effects.iter().enumerate() {
            if self.target_effects[..i].iter().any(|e| e.id == effect.id) {
                return Err(TelemetryError::DuplicateTargetEffect(effect.id));
            }
        }

        Ok(())
    }
}

impl CombatOracle for TelemetrySnapshot {
    fn job(&self) -> Option<Job> {
        self.job
    }

    fn level(&self) -> u8 {
        self.level
    }

    fn combo(&self) -> ComboState {
        self.combo
    }

    fn gauge(&self) -> JobGauge {
        self.gauge
    }

    fn has_self_buff(&self, effect: EffectId) -> bool {
        self.self_buffs.contains(&effect)
    }

    fn target_effect(&self, effect: EffectId) -> Option<StatusEffect> {
        self.target_effects.iter().find(|e| e.id == effect).copied()
    }

    fn resolved_form(&self, action: ActionId) -> ActionId {
        self.resolved_forms
            .iter()
            .find(|f| f.action == action)
            .map_or_else(|| jobs::unlocked_form(action, self.level), |f| f.resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::DancerGauge;

    #[test]
    fn unknown_slots_resolve_to_themselves() {
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80).with_form(ActionId(7409), ActionId(98));

        assert_eq!(snapshot.resolved_form(ActionId(7409)), ActionId(98));
        assert_eq!(snapshot.resolved_form(ActionId(97)), ActionId(97));
    }

    #[test]
    fn forms_follow_level_unless_overridden() {
        let low = TelemetrySnapshot::new(Job::Bard, 60);
        let high = low.clone().with_level(80);

        assert_eq!(low.resolved_form(ActionId(7409)), ActionId(98));
        assert_eq!(high.resolved_form(ActionId(7409)), ActionId(7409));
        assert_eq!(
            low.with_form(ActionId(7409), ActionId(7409)).resolved_form(ActionId(7409)),
            ActionId(7409)
        );
    }

    #[test]
    fn later_target_effect_replaces_earlier() {
        let snapshot = TelemetrySnapshot::new(Job::Bard, 80)
            .with_target_effect(EffectId(124), 3.0)
            .with_target_effect(EffectId(124), 9.0);

        assert_eq!(snapshot.target_effects.len(), 1);
        assert_eq!(snapshot.target_effect(EffectId(124)).map(|e| e.remaining), Some(9.0));
    }

    #[test]
    fn validate_rejects_foreign_gauge() {
        let snapshot =
            TelemetrySnapshot::new(Job::Bard, 80).with_gauge(JobGauge::Dancer(DancerGauge::default()));

        assert_eq!(
            snapshot.validate(),
            Err(TelemetryError::GaugeJobMismatch {
                job: Job::Bard,
                gauge: Job::Dancer
            })
        );
    }

    #[test]
    fn validate_rejects_level_zero() {
        let snapshot = TelemetrySnapshot::new(Job::Dancer, 0);
        assert!(matches!(
            snapshot.validate(),
            Err(TelemetryError::LevelOutOfRange { level: 0, .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_effects() {
        let mut snapshot = TelemetrySnapshot::new(Job::Bard, 50);
        snapshot.target_effects = vec![
            StatusEffect::new(EffectId(129), 2.0),
            StatusEffect::new(EffectId(129), 4.0),
        ];

        assert_eq!(
            snapshot.validate(),
            Err(TelemetryError::DuplicateTargetEffect(EffectId(129)))
        );
    }
}
