//! Dancer rule units.
//!
//! Two presets here overlap on purpose: the dance compatibility remap claims
//! whatever four actions the user configured (Cascade, Flourish and both Fan Dances by
//! default), which the multibutton and Fan Dance presets also claim. The
//! compatibility remap is declared first and only substitutes mid-dance, so
//! the other presets keep working outside a dance.

use crate::telemetry::DancerGauge;
use crate::{ActionId, ComboConfig, ComboRule, Preset, RuleContext};

pub const CASCADE: ActionId = ActionId(15989);
pub const FOUNTAIN: ActionId = ActionId(15990);
pub const REVERSE_CASCADE: ActionId = ActionId(15991);
pub const FOUNTAINFALL: ActionId = ActionId(15992);
pub const WINDMILL: ActionId = ActionId(15993);
pub const RISING_WINDMILL: ActionId = ActionId(15994);
pub const BLADESHOWER: ActionId = ActionId(15995);
pub const BLOODSHOWER: ActionId = ActionId(15996);
pub const STANDARD_STEP: ActionId = ActionId(15997);
pub const TECHNICAL_STEP: ActionId = ActionId(15998);
pub const EMBOITE: ActionId = ActionId(15999);
pub const ENTRECHAT: ActionId = ActionId(16000);
pub const JETE: ActionId = ActionId(16001);
pub const PIROUETTE: ActionId = ActionId(16002);
pub const STANDARD_FINISH: ActionId = ActionId(16003);
pub const TECHNICAL_FINISH: ActionId = ActionId(16004);
pub const FAN_DANCE: ActionId = ActionId(16007);
pub const FAN_DANCE_II: ActionId = ActionId(16008);
pub const FAN_DANCE_III: ActionId = ActionId(16009);
pub const FLOURISH: ActionId = ActionId(16013);

/// Dance steps in the order of the four compatibility slots.
pub const STEPS: [ActionId; 4] = [EMBOITE, ENTRECHAT, JETE, PIROUETTE];

/// Default actions remapped to [`STEPS`] while dancing.
pub const DEFAULT_COMPAT_ACTIONS: [ActionId; 4] = [CASCADE, FLOURISH, FAN_DANCE, FAN_DANCE_II];

pub mod buffs {
    use crate::EffectId;

    pub const FLOURISHING_CASCADE: EffectId = EffectId(1814);
    pub const FLOURISHING_FOUNTAIN: EffectId = EffectId(1815);
    pub const STANDARD_STEP: EffectId = EffectId(1818);
    pub const TECHNICAL_STEP: EffectId = EffectId(1819);
    pub const FLOURISHING_FAN_DANCE: EffectId = EffectId(1820);
}

pub mod levels {
    pub const FOUNTAIN: u8 = 2;
    pub const REVERSE_CASCADE: u8 = 20;
    pub const FOUNTAINFALL: u8 = 40;
    pub const FAN_DANCE_III: u8 = 66;
}

const STANDARD_STEP_COUNT: u8 = 2;
const TECHNICAL_STEP_COUNT: u8 = 4;

/// Remaps four user-chosen actions to the dance steps while dancing.
pub struct DanceComboCompatibility;

impl ComboRule for DanceComboCompatibility {
    fn preset(&self) -> Preset {
        Preset::DancerDanceComboCompatibility
    }

    fn claims(&self, action: ActionId, config: &ComboConfig) -> bool {
        config.dancer_dance_compat_action_ids.contains(&action)
    }

    fn parameterized(&self) -> bool {
        true
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        let slots = &ctx.config().dancer_dance_compat_action_ids;
        let Some(slot) = slots.iter().position(|&id| id == ctx.action) else {
            return ctx.action;
        };

        if ctx.gauge::<DancerGauge>().is_some_and(|gauge| gauge.dancing) {
            return STEPS[slot];
        }

        ctx.action
    }
}

/// Standard / Technical Step walk through the steps, then the finish.
pub struct DanceStepCombo;

impl ComboRule for DanceStepCombo {
    fn preset(&self) -> Preset {
        Preset::DancerDanceStepCombo
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        let (buff, steps, finish) = match ctx.action {
            STANDARD_STEP => (buffs::STANDARD_STEP, STANDARD_STEP_COUNT, STANDARD_FINISH),
            TECHNICAL_STEP => (buffs::TECHNICAL_STEP, TECHNICAL_STEP_COUNT, TECHNICAL_FINISH),
            _ => return ctx.action,
        };

        let Some(gauge) = ctx.gauge::<DancerGauge>() else {
            return ctx.action;
        };

        if gauge.dancing && ctx.has_effect(buff) {
            if gauge.completed_steps < steps {
                return gauge.next_step;
            }
            return finish;
        }

        ctx.action
    }
}

/// Fan Dance and Fan Dance II become Fan Dance III on proc.
pub struct FanDanceCombo;

impl ComboRule for FanDanceCombo {
    fn preset(&self) -> Preset {
        Preset::DancerFanDanceCombo
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        if (ctx.action == FAN_DANCE || ctx.action == FAN_DANCE_II)
            && ctx.level >= levels::FAN_DANCE_III
            && ctx.has_effect(buffs::FLOURISHING_FAN_DANCE)
        {
            return FAN_DANCE_III;
        }

        ctx.action
    }
}

/// Cascade walks the single-target combo and spends procs first.
pub struct SingleTargetMultibutton;

impl ComboRule for SingleTargetMultibutton {
    fn preset(&self) -> Preset {
        Preset::DancerSingleTargetMultibutton
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        if ctx.action != CASCADE {
            return ctx.action;
        }

        if ctx.level >= levels::FOUNTAINFALL && ctx.has_effect(buffs::FLOURISHING_FOUNTAIN) {
            return FOUNTAINFALL;
        }

        if ctx.level >= levels::REVERSE_CASCADE && ctx.has_effect(buffs::FLOURISHING_CASCADE) {
            return REVERSE_CASCADE;
        }

        if ctx.level >= levels::FOUNTAIN && ctx.combo.chained_from(CASCADE) {
            return FOUNTAIN;
        }

        CASCADE
    }
}
