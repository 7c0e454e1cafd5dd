//! Upgrades that only adjust stats.
//!
//! Max hull, max shields and agility bonuses are after-get hooks, so they
//! add to whatever the stored value is. Veteran Instincts goes through the
//! pilot skill modifier stack instead, where only the newest modifier
//! applies.

use crate::core::AbilityRef;
use crate::ship::{Stat, Upgrade, UpgradeType};

use super::{Ability, Hook};

/// Elite: +2 pilot skill.
#[must_use]
pub fn veteran_instincts() -> Upgrade {
    Upgrade::new("Veteran Instincts", UpgradeType::Elite, 1).with_ability(Ability::new(
        "Veteran Instincts",
        |_: AbilityRef| vec![Hook::pilot_skill(|ps: &mut i32| *ps += 2)],
    ))
}

/// Modification: +1 max hull.
#[must_use]
pub fn hull_upgrade() -> Upgrade {
    stat_bonus("Hull Upgrade", 3, Stat::MaxHull)
}

/// Modification: +1 max shields.
#[must_use]
pub fn shield_upgrade() -> Upgrade {
    stat_bonus("Shield Upgrade", 4, Stat::MaxShields)
}

/// Modification: +1 agility.
#[must_use]
pub fn stealth_device() -> Upgrade {
    stat_bonus("Stealth Device", 3, Stat::Agility)
}

fn stat_bonus(name: &'static str, cost: u32, stat: Stat) -> Upgrade {
    Upgrade::new(name, UpgradeType::Modification, cost).with_ability(Ability::new(name, move |_: AbilityRef| {
        vec![Hook::stat(stat, |value: &mut i32| *value += 1)]
    }))
}
