//! Bard rule units.

use crate::telemetry::{BardGauge, Song};
use crate::{ActionId, ComboRule, Preset, RuleContext};

pub const HEAVY_SHOT: ActionId = ActionId(97);
pub const STRAIGHT_SHOT: ActionId = ActionId(98);
pub const VENOMOUS_BITE: ActionId = ActionId(100);
pub const QUICK_NOCK: ActionId = ActionId(106);
pub const WINDBITE: ActionId = ActionId(113);
pub const WANDERERS_MINUET: ActionId = ActionId(3559);
pub const IRON_JAWS: ActionId = ActionId(3560);
pub const PITCH_PERFECT: ActionId = ActionId(7404);
pub const CAUSTIC_BITE: ActionId = ActionId(7406);
pub const STORMBITE: ActionId = ActionId(7407);
pub const REFULGENT_ARROW: ActionId = ActionId(7409);
pub const BURST_SHOT: ActionId = ActionId(16495);
pub const APEX_ARROW: ActionId = ActionId(16496);

pub mod buffs {
    use crate::EffectId;

    pub const STRAIGHT_SHOT_READY: EffectId = EffectId(122);
}

pub mod debuffs {
    use crate::EffectId;

    pub const VENOMOUS_BITE: EffectId = EffectId(124);
    pub const WINDBITE: EffectId = EffectId(129);
    pub const CAUSTIC_BITE: EffectId = EffectId(1200);
    pub const STORMBITE: EffectId = EffectId(1201);
}

pub mod levels {
    pub const WINDBITE: u8 = 30;
    pub const IRON_JAWS: u8 = 56;
    pub const BITE_UPGRADE: u8 = 64;
    pub const REFULGENT_ARROW: u8 = 70;
    pub const BURST_SHOT: u8 = 76;
}

/// Upgraded actions with the base form they replace and the level they unlock.
pub const UPGRADES: &[(ActionId, ActionId, u8)] = &[
    (REFULGENT_ARROW, STRAIGHT_SHOT, levels::REFULGENT_ARROW),
    (BURST_SHOT, HEAVY_SHOT, levels::BURST_SHOT),
];

/// Wanderer's Minuet becomes Pitch Perfect while the Minuet is playing.
pub struct WanderersPitchPerfect;

impl ComboRule for WanderersPitchPerfect {
    fn preset(&self) -> Preset {
        Preset::BardWanderersPitchPerfectFeature
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        if ctx.action == WANDERERS_MINUET
            && ctx
                .gauge::<BardGauge>()
                .is_some_and(|gauge| gauge.song == Song::WanderersMinuet)
        {
            return PITCH_PERFECT;
        }

        ctx.action
    }
}

/// Heavy Shot / Burst Shot becomes Straight Shot / Refulgent Arrow on proc.
pub struct StraightShotUpgrade;

impl ComboRule for StraightShotUpgrade {
    fn preset(&self) -> Preset {
        Preset::BardStraightShotUpgradeFeature
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        if (ctx.action == HEAVY_SHOT || ctx.action == BURST_SHOT)
            && ctx.has_effect(buffs::STRAIGHT_SHOT_READY)
        {
            return ctx.resolved_form(REFULGENT_ARROW);
        }

        ctx.action
    }
}

/// Iron Jaws applies whichever bite is missing, or refreshes both once it can.
///
/// | level        | both present             | one present        | none        |
/// |--------------|--------------------------|--------------------|-------------|
/// | < 30         | the one expiring sooner  | Venomous Bite      | Venomous    |
/// | 30..56       | the one expiring sooner  | the missing one    | Windbite    |
/// | 56..64       | Iron Jaws                | the missing one    | Windbite    |
/// | >= 64        | Iron Jaws                | the missing one    | Stormbite   |
///
/// In the 56..64 bracket Iron Jaws is re-issued as-is when both bites are up.
pub struct IronJaws;

impl ComboRule for IronJaws {
    fn preset(&self) -> Preset {
        Preset::BardIronJawsFeature
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        if ctx.action != IRON_JAWS {
            return ctx.action;
        }

        if ctx.level < levels::IRON_JAWS {
            let venomous = ctx.find_target_effect(debuffs::VENOMOUS_BITE);
            let windbite = ctx.find_target_effect(debuffs::WINDBITE);

            return match (venomous, windbite) {
                (Some(venomous), Some(windbite)) => {
                    if venomous.remaining < windbite.remaining {
                        VENOMOUS_BITE
                    } else {
                        WINDBITE
                    }
                }
                (_, Some(_)) => VENOMOUS_BITE,
                _ if ctx.level < levels::WINDBITE => VENOMOUS_BITE,
                _ => WINDBITE,
            };
        }

        if ctx.level < levels::BITE_UPGRADE {
            let venomous = ctx.target_has_effect(debuffs::VENOMOUS_BITE);
            let windbite = ctx.target_has_effect(debuffs::WINDBITE);

            return match (venomous, windbite) {
                (true, true) => IRON_JAWS,
                (_, true) => VENOMOUS_BITE,
                _ => WINDBITE,
            };
        }

        let caustic = ctx.target_has_effect(debuffs::CAUSTIC_BITE);
        let stormbite = ctx.target_has_effect(debuffs::STORMBITE);

        match (caustic, stormbite) {
            (true, true) => IRON_JAWS,
            (_, true) => CAUSTIC_BITE,
            _ => STORMBITE,
        }
    }
}

/// Quick Nock becomes Apex Arrow at full Soul Voice.
///
/// The preset is dormant: the resolver never evaluates it and the rule
/// passes the nominal action through.
pub struct Apex;

impl ComboRule for Apex {
    fn preset(&self) -> Preset {
        Preset::BardApexFeature
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> ActionId {
        // TODO: return APEX_ARROW when `soul_voice == 100` once the preset is
        // taken out of dormancy.
        ctx.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::JobGauge;
    use crate::{ComboConfig, EffectId, Job, TelemetrySnapshot};

    fn eval(rule: &dyn ComboRule, action: ActionId, snapshot: &TelemetrySnapshot) -> ActionId {
        let config = ComboConfig::default();
        rule.evaluate(&RuleContext::new(action, snapshot, &config))
    }

    fn bard(level: u8) -> TelemetrySnapshot {
        TelemetrySnapshot::new(Job::Bard, level)
    }

    fn with_song(song: Song) -> TelemetrySnapshot {
        bard(80).with_gauge(JobGauge::Bard(BardGauge {
            song,
            ..BardGauge::default()
        }))
    }

    #[test]
    fn pitch_perfect_only_during_minuet() {
        let rule = WanderersPitchPerfect;

        assert_eq!(
            eval(&rule, WANDERERS_MINUET, &with_song(Song::WanderersMinuet)),
            PITCH_PERFECT
        );
        assert_eq!(
            eval(&rule, WANDERERS_MINUET, &with_song(Song::MagesBallad)),
            WANDERERS_MINUET
        );
        assert_eq!(
            eval(&rule, HEAVY_SHOT, &with_song(Song::WanderersMinuet)),
            HEAVY_SHOT
        );
    }

    #[test]
    fn straight_shot_tracks_unlocked_tier() {
        let rule = StraightShotUpgrade;
        let low = bard(60).with_buff(buffs::STRAIGHT_SHOT_READY);
        let high = low.clone().with_level(70);

        assert_eq!(eval(&rule, HEAVY_SHOT, &low), STRAIGHT_SHOT);
        assert_eq!(eval(&rule, BURST_SHOT, &high), REFULGENT_ARROW);
        assert_eq!(eval(&rule, HEAVY_SHOT, &bard(70)), HEAVY_SHOT);
    }

    #[test]
    fn iron_jaws_low_level_always_venomous() {
        let rule = IronJaws;
        assert_eq!(eval(&rule, IRON_JAWS, &bard(10)), VENOMOUS_BITE);
        let venom_up = bard(10).with_target_effect(debuffs::VENOMOUS_BITE, 12.0);
        assert_eq!(eval(&rule, IRON_JAWS, &venom_up), VENOMOUS_BITE);
    }

    #[test]
    fn iron_jaws_refreshes_sooner_expiring_bite() {
        let rule = IronJaws;
        let venom_sooner = bard(50)
            .with_target_effect(debuffs::VENOMOUS_BITE, 3.0)
            .with_target_effect(debuffs::WINDBITE, 7.0);
        let wind_sooner = bard(50)
            .with_target_effect(debuffs::VENOMOUS_BITE, 7.0)
            .with_target_effect(debuffs::WINDBITE, 3.0);
        let tied = bard(50)
            .with_target_effect(debuffs::VENOMOUS_BITE, 5.0)
            .with_target_effect(debuffs::WINDBITE, 5.0);

        assert_eq!(eval(&rule, IRON_JAWS, &venom_sooner), VENOMOUS_BITE);
        assert_eq!(eval(&rule, IRON_JAWS, &wind_sooner), WINDBITE);
        assert_eq!(eval(&rule, IRON_JAWS, &tied), WINDBITE);
    }

    #[test]
    fn iron_jaws_applies_missing_bite() {
        let rule = IronJaws;
        let only_wind = bard(50).with_target_effect(debuffs::WINDBITE, 9.0);
        let only_venom = bard(50).with_target_effect(debuffs::VENOMOUS_BITE, 9.0);

        assert_eq!(eval(&rule, IRON_JAWS, &only_wind), VENOMOUS_BITE);
        assert_eq!(eval(&rule, IRON_JAWS, &only_venom), WINDBITE);
        assert_eq!(eval(&rule, IRON_JAWS, &bard(50)), WINDBITE);
    }

    #[test]
    fn iron_jaws_mid_bracket_passes_through_when_both_up() {
        let rule = IronJaws;
        let both = bard(60)
            .with_target_effect(debuffs::VENOMOUS_BITE, 3.0)
            .with_target_effect(debuffs::WINDBITE, 7.0);
        let only_wind = bard(60).with_target_effect(debuffs::WINDBITE, 7.0);

        assert_eq!(eval(&rule, IRON_JAWS, &both), IRON_JAWS);
        assert_eq!(eval(&rule, IRON_JAWS, &only_wind), VENOMOUS_BITE);
        assert_eq!(eval(&rule, IRON_JAWS, &bard(60)), WINDBITE);
    }

    #[test]
    fn iron_jaws_upgraded_bites() {
        let rule = IronJaws;
        let both = bard(80)
            .with_target_effect(debuffs::CAUSTIC_BITE, 3.0)
            .with_target_effect(debuffs::STORMBITE, 7.0);
        let only_storm = bard(80).with_target_effect(debuffs::STORMBITE, 7.0);
        let only_caustic = bard(80).with_target_effect(debuffs::CAUSTIC_BITE, 7.0);

        assert_eq!(eval(&rule, IRON_JAWS, &both), IRON_JAWS);
        assert_eq!(eval(&rule, IRON_JAWS, &only_storm), CAUSTIC_BITE);
        assert_eq!(eval(&rule, IRON_JAWS, &only_caustic), STORMBITE);
        assert_eq!(eval(&rule, IRON_JAWS, &bard(80)), STORMBITE);
    }

    #[test]
    fn expired_debuff_counts_as_missing() {
        let rule = IronJaws;
        let zero = bard(80)
            .with_target_effect(debuffs::CAUSTIC_BITE, 0.0)
            .with_target_effect(debuffs::STORMBITE, 7.0);
        let nan = bard(50)
            .with_target_effect(debuffs::VENOMOUS_BITE, f32::NAN)
            .with_target_effect(debuffs::WINDBITE, 7.0);

        assert_eq!(eval(&rule, IRON_JAWS, &zero), CAUSTIC_BITE);
        assert_eq!(eval(&rule, IRON_JAWS, &nan), VENOMOUS_BITE);
    }

    #[test]
    fn old_bites_ignored_after_upgrade() {
        let rule = IronJaws;
        let old = bard(70)
            .with_target_effect(debuffs::VENOMOUS_BITE, 10.0)
            .with_target_effect(debuffs::WINDBITE, 10.0)
            .with_target_effect(EffectId(9999), 10.0);

        assert_eq!(eval(&rule, IRON_JAWS, &old), STORMBITE);
    }

    #[test]
    fn apex_stays_dormant() {
        let full = bard(80).with_gauge(JobGauge::Bard(BardGauge {
            soul_voice: 100,
            ..BardGauge::default()
        }));
        assert_eq!(eval(&Apex, QUICK_NOCK, &full), QUICK_NOCK);
    }
}
