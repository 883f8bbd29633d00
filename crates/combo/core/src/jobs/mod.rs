//! Rule units grouped by job.
//!
//! Each submodule holds the job's action, effect and level constants next to
//! the rules that use them.

pub mod bard;
pub mod dancer;

use std::sync::Arc;

use crate::{ActionId, ComboRule};

/// Every rule unit, in precedence order.
///
/// When several enabled rules claim the same nominal action, the one listed
/// first wins if it substitutes anything.
pub fn default_rules() -> Vec<Arc<dyn ComboRule>> {
    vec![
        Arc::new(bard::WanderersPitchPerfect),
        Arc::new(bard::StraightShotUpgrade),
        Arc::new(bard::IronJaws),
        Arc::new(bard::Apex),
        Arc::new(dancer::DanceComboCompatibility),
        Arc::new(dancer::DanceStepCombo),
        Arc::new(dancer::FanDanceCombo),
        Arc::new(dancer::SingleTargetMultibutton),
    ]
}

/// Form of `action` actually available at `level`.
///
/// Walks down the upgrade chains until the action is unlocked. Actions
/// outside any chain are returned unchanged.
pub fn unlocked_form(mut action: ActionId, level: u8) -> ActionId {
    while let Some(&(_, base, _)) = bard::UPGRADES
        .iter()
        .find(|&&(upgraded, _, unlock)| upgraded == action && level < unlock)
    {
        action = base;
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preset;
    use strum::IntoEnumIterator;

    #[test]
    fn one_rule_per_preset_in_declaration_order() {
        let presets: Vec<Preset> = default_rules().iter().map(|rule| rule.preset()).collect();
        let declared: Vec<Preset> = Preset::iter().collect();
        assert_eq!(presets, declared);
    }

    #[test]
    fn upgrades_fall_back_below_unlock_level() {
        assert_eq!(
            unlocked_form(bard::REFULGENT_ARROW, bard::levels::REFULGENT_ARROW - 1),
            bard::STRAIGHT_SHOT
        );
        assert_eq!(
            unlocked_form(bard::REFULGENT_ARROW, bard::levels::REFULGENT_ARROW),
            bard::REFULGENT_ARROW
        );
        assert_eq!(
            unlocked_form(bard::BURST_SHOT, bard::levels::BURST_SHOT - 1),
            bard::HEAVY_SHOT
        );
        assert_eq!(unlocked_form(bard::BURST_SHOT, 90), bard::BURST_SHOT);
        assert_eq!(unlocked_form(bard::IRON_JAWS, 1), bard::IRON_JAWS);
    }
}
