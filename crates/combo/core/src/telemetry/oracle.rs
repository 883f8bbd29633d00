//! The telemetry facade consumed by rules.

use crate::telemetry::JobGauge;
use crate::{ActionId, EffectId, Job};

/// Read-only view of the instantaneous combat state.
///
/// Every call reflects the state at invocation time. Implementations must not
/// have observable side effects; the engine may call any method several times
/// during one resolution.
pub trait CombatOracle: Send + Sync {
    /// Job the player is currently on, if any.
    fn job(&self) -> Option<Job>;

    /// Character level.
    fn level(&self) -> u8;

    /// Last chained action and the time since it executed.
    fn combo(&self) -> ComboState;

    /// Resource gauge of the current job.
    fn gauge(&self) -> JobGauge;

    /// Whether the player carries the given buff.
    fn has_self_buff(&self, effect: EffectId) -> bool;

    /// The given effect on the current target, if present.
    ///
    /// Implementations may report raw values; the engine treats zero,
    /// negative or non-finite durations as absent.
    fn target_effect(&self, effect: EffectId) -> Option<StatusEffect>;

    /// Resolves an ability slot to its currently unlocked upgrade tier.
    fn resolved_form(&self, action: ActionId) -> ActionId;
}

/// A status effect seen on the target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: EffectId,
    /// Remaining duration in seconds.
    pub remaining: f32,
}

impl StatusEffect {
    pub const fn new(id: EffectId, remaining: f32) -> Self {
        Self { id, remaining }
    }

    /// True if the effect has a usable, positive remaining duration.
    pub fn is_active(&self) -> bool {
        self.remaining.is_finite() && self.remaining > 0.0
    }
}

/// Combo chain state owned by the game.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComboState {
    /// Last action that successfully chained.
    pub last_action: Option<ActionId>,
    /// Seconds since `last_action` executed.
    pub elapsed: f32,
}

impl ComboState {
    /// Length of the combo window in seconds.
    pub const WINDOW_SECS: f32 = 30.0;

    pub const fn new(last_action: ActionId, elapsed: f32) -> Self {
        Self {
            last_action: Some(last_action),
            elapsed,
        }
    }

    /// True while a follow-up action still counts as chained.
    pub fn is_open(&self) -> bool {
        self.last_action.is_some()
            && self.elapsed.is_finite()
            && self.elapsed >= 0.0
            && self.elapsed < Self::WINDOW_SECS
    }

    /// True if the window is open and was started by `action`.
    pub fn chained_from(&self, action: ActionId) -> bool {
        self.is_open() && self.last_action == Some(action)
    }
}
