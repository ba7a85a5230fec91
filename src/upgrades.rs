//! Purchasable gameplay upgrades
//!
//! Two shapes: the one-time double-jump unlock, and leveled duration
//! upgrades for the three timed power-up effects. Leveled costs grow by a
//! floored 1.5x on every purchase.

use serde::{Deserialize, Serialize};

use crate::sim::state::PickupKind;

/// Multiplier applied to a leveled upgrade's cost after each purchase
const COST_GROWTH: f64 = 1.5;

/// One-time unlock that raises the max jump count from 1 to 2
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoubleJump {
    #[serde(default)]
    pub purchased: bool,
    #[serde(default = "DoubleJump::default_cost")]
    pub cost: u64,
}

impl DoubleJump {
    fn default_cost() -> u64 {
        2000
    }
}

impl Default for DoubleJump {
    fn default() -> Self {
        Self {
            purchased: false,
            cost: Self::default_cost(),
        }
    }
}

/// Leveled upgrade extending how long a power-up effect stays active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationUpgrade {
    #[serde(default = "DurationUpgrade::default_level")]
    pub level: u32,
    #[serde(default = "DurationUpgrade::default_base_ms")]
    pub base_ms: f32,
    #[serde(default = "DurationUpgrade::default_increment_ms")]
    pub increment_ms: f32,
    #[serde(default = "DurationUpgrade::default_cost")]
    pub cost: u64,
}

impl DurationUpgrade {
    fn default_level() -> u32 {
        1
    }
    fn default_base_ms() -> f32 {
        5000.0
    }
    fn default_increment_ms() -> f32 {
        1000.0
    }
    fn default_cost() -> u64 {
        300
    }

    /// Effective effect duration at the current level
    pub fn duration_ms(&self) -> f32 {
        self.base_ms + (self.level.saturating_sub(1)) as f32 * self.increment_ms
    }
}

impl Default for DurationUpgrade {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            base_ms: Self::default_base_ms(),
            increment_ms: Self::default_increment_ms(),
            cost: Self::default_cost(),
        }
    }
}

/// Identifies an upgrade in purchase requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeId {
    DoubleJump,
    ShieldDuration,
    MagnetDuration,
    ScoreDoublerDuration,
}

/// All upgrade state, persisted as part of the profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Upgrades {
    #[serde(default)]
    pub double_jump: DoubleJump,
    #[serde(default)]
    pub shield_duration: DurationUpgrade,
    #[serde(default)]
    pub magnet_duration: DurationUpgrade,
    #[serde(default)]
    pub score_doubler_duration: DurationUpgrade,
}

impl Upgrades {
    /// Max jumps allowed per flight given the double-jump unlock
    pub fn max_jumps(&self) -> u8 {
        if self.double_jump.purchased { 2 } else { 1 }
    }

    /// Effect duration for a pickup kind at its current upgrade level
    pub fn effect_duration_ms(&self, kind: PickupKind) -> f32 {
        self.duration_upgrade(kind).duration_ms()
    }

    pub fn duration_upgrade(&self, kind: PickupKind) -> &DurationUpgrade {
        match kind {
            PickupKind::Shield => &self.shield_duration,
            PickupKind::Magnet => &self.magnet_duration,
            PickupKind::ScoreDoubler => &self.score_doubler_duration,
        }
    }

    fn duration_upgrade_mut(&mut self, kind: PickupKind) -> &mut DurationUpgrade {
        match kind {
            PickupKind::Shield => &mut self.shield_duration,
            PickupKind::Magnet => &mut self.magnet_duration,
            PickupKind::ScoreDoubler => &mut self.score_doubler_duration,
        }
    }

    /// Attempt a purchase against the given currency balance.
    ///
    /// Silently refuses (returns false, no state change) when the balance
    /// is short or a one-time upgrade is already owned.
    pub fn purchase(&mut self, id: UpgradeId, currency: &mut u64) -> bool {
        match id {
            UpgradeId::DoubleJump => {
                if self.double_jump.purchased || *currency < self.double_jump.cost {
                    return false;
                }
                *currency -= self.double_jump.cost;
                self.double_jump.purchased = true;
                true
            }
            UpgradeId::ShieldDuration => {
                Self::purchase_leveled(&mut self.shield_duration, currency)
            }
            UpgradeId::MagnetDuration => {
                Self::purchase_leveled(&mut self.magnet_duration, currency)
            }
            UpgradeId::ScoreDoublerDuration => {
                Self::purchase_leveled(&mut self.score_doubler_duration, currency)
            }
        }
    }

    fn purchase_leveled(upgrade: &mut DurationUpgrade, currency: &mut u64) -> bool {
        if *currency < upgrade.cost {
            return false;
        }
        *currency -= upgrade.cost;
        upgrade.level += 1;
        upgrade.cost = (upgrade.cost as f64 * COST_GROWTH).floor() as u64;
        true
    }
}
