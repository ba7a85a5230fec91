//! Tiered progress missions
//!
//! Three independent counters advanced by gameplay events: distance run,
//! coins collected, and obstacles cleared. Progress is cumulative and never
//! resets; each claim pays the current tier's reward and moves the bar to
//! the next, larger goal.

use serde::{Deserialize, Serialize};

/// One {goal, reward} step in a mission's progression
#[derive(Debug, Clone, Copy)]
pub struct MissionTier {
    pub goal: f64,
    pub reward: u64,
}

const fn tier(goal: f64, reward: u64) -> MissionTier {
    MissionTier { goal, reward }
}

const RUN_DISTANCE_TIERS: &[MissionTier] = &[
    tier(5_000.0, 250),
    tier(10_000.0, 500),
    tier(25_000.0, 1_000),
    tier(50_000.0, 2_000),
    tier(75_000.0, 3_500),
    tier(100_000.0, 5_000),
];

const COLLECT_COINS_TIERS: &[MissionTier] = &[
    tier(250.0, 250),
    tier(750.0, 500),
    tier(1_500.0, 1_000),
    tier(3_000.0, 2_000),
    tier(5_000.0, 3_500),
    tier(10_000.0, 5_000),
];

const JUMP_OBSTACLES_TIERS: &[MissionTier] = &[
    tier(50.0, 250),
    tier(150.0, 500),
    tier(400.0, 1_000),
    tier(1_000.0, 2_000),
    tier(2_000.0, 3_500),
    tier(5_000.0, 5_000),
];

/// Identifies a mission in accrual and claim requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionKind {
    RunDistance,
    CollectCoins,
    JumpObstacles,
}

impl MissionKind {
    pub const ALL: [MissionKind; 3] = [
        MissionKind::RunDistance,
        MissionKind::CollectCoins,
        MissionKind::JumpObstacles,
    ];

    pub fn tiers(self) -> &'static [MissionTier] {
        match self {
            MissionKind::RunDistance => RUN_DISTANCE_TIERS,
            MissionKind::CollectCoins => COLLECT_COINS_TIERS,
            MissionKind::JumpObstacles => JUMP_OBSTACLES_TIERS,
        }
    }

    /// Description template for the mission UI; `%goal%` is substituted
    /// with the current tier's goal
    pub fn description(self) -> &'static str {
        match self {
            MissionKind::RunDistance => "Run %goal% meters",
            MissionKind::CollectCoins => "Collect %goal% coins",
            MissionKind::JumpObstacles => "Jump over %goal% obstacles",
        }
    }
}

/// Persisted per-mission state; the tier tables themselves are static
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub current_level: usize,
}

/// All three missions, persisted as part of the profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Missions {
    #[serde(default)]
    pub run_distance: Mission,
    #[serde(default)]
    pub collect_coins: Mission,
    #[serde(default)]
    pub jump_obstacles: Mission,
}

impl Missions {
    pub fn get(&self, kind: MissionKind) -> &Mission {
        match kind {
            MissionKind::RunDistance => &self.run_distance,
            MissionKind::CollectCoins => &self.collect_coins,
            MissionKind::JumpObstacles => &self.jump_obstacles,
        }
    }

    pub fn get_mut(&mut self, kind: MissionKind) -> &mut Mission {
        match kind {
            MissionKind::RunDistance => &mut self.run_distance,
            MissionKind::CollectCoins => &mut self.collect_coins,
            MissionKind::JumpObstacles => &mut self.jump_obstacles,
        }
    }

    /// True once every tier of the mission has been claimed
    pub fn is_maxed(&self, kind: MissionKind) -> bool {
        self.get(kind).current_level >= kind.tiers().len()
    }

    /// The tier the mission is currently working toward, None when maxed
    pub fn current_tier(&self, kind: MissionKind) -> Option<MissionTier> {
        kind.tiers().get(self.get(kind).current_level).copied()
    }

    /// Add progress; maxed missions stop accruing
    pub fn accrue(&mut self, kind: MissionKind, amount: f64) {
        if self.is_maxed(kind) {
            return;
        }
        self.get_mut(kind).progress += amount;
    }

    /// Claim the current tier's reward if the goal is met.
    ///
    /// Pays the reward into `currency`, advances the tier, and returns the
    /// amount paid. Progress is NOT reset; it keeps counting toward the
    /// next goal. Returns None (no state change) when the goal is unmet or
    /// the mission is maxed.
    pub fn claim(&mut self, kind: MissionKind, currency: &mut u64) -> Option<u64> {
        let tier = self.current_tier(kind)?;
        let mission = self.get_mut(kind);
        if mission.progress < tier.goal {
            return None;
        }
        mission.current_level += 1;
        *currency += tier.reward;
        Some(tier.reward)
    }

    /// Clamp loaded values into range (defensive defaulting on load)
    pub fn sanitize(&mut self) {
        for kind in MissionKind::ALL {
            let tier_count = kind.tiers().len();
            let mission = self.get_mut(kind);
            if !mission.progress.is_finite() || mission.progress < 0.0 {
                mission.progress = 0.0;
            }
            mission.current_level = mission.current_level.min(tier_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrue_and_claim_advances_tier() {
        let mut missions = Missions::default();
        let mut currency = 0u64;

        missions.accrue(MissionKind::CollectCoins, 250.0);
        assert_eq!(missions.claim(MissionKind::CollectCoins, &mut currency), Some(250));
        assert_eq!(currency, 250);
        assert_eq!(missions.collect_coins.current_level, 1);
        // Progress carries over toward the next goal
        assert_eq!(missions.collect_coins.progress, 250.0);
    }

    #[test]
    fn test_claim_refused_below_goal() {
        let mut missions = Missions::default();
        let mut currency = 100u64;

        missions.accrue(MissionKind::JumpObstacles, 49.0);
        assert_eq!(missions.claim(MissionKind::JumpObstacles, &mut currency), None);
        assert_eq!(currency, 100);
        assert_eq!(missions.jump_obstacles.current_level, 0);
    }

    #[test]
    fn test_progress_stops_when_maxed() {
        let mut missions = Missions::default();
        let mut currency = 0u64;

        // Claim every distance tier
        missions.accrue(MissionKind::RunDistance, 100_000.0);
        while missions.claim(MissionKind::RunDistance, &mut currency).is_some() {}
        assert!(missions.is_maxed(MissionKind::RunDistance));
        assert_eq!(currency, 250 + 500 + 1_000 + 2_000 + 3_500 + 5_000);

        let frozen = missions.run_distance.progress;
        missions.accrue(MissionKind::RunDistance, 500.0);
        assert_eq!(missions.run_distance.progress, frozen);

        // Claiming a maxed mission is a no-op
        assert_eq!(missions.claim(MissionKind::RunDistance, &mut currency), None);
    }

    #[test]
    fn test_cumulative_progress_spans_multiple_tiers() {
        let mut missions = Missions::default();
        let mut currency = 0u64;

        missions.accrue(MissionKind::CollectCoins, 800.0);
        assert_eq!(missions.claim(MissionKind::CollectCoins, &mut currency), Some(250));
        // 800 already meets the second goal of 750
        assert_eq!(missions.claim(MissionKind::CollectCoins, &mut currency), Some(500));
        // Third goal is 1500, not met yet
        assert_eq!(missions.claim(MissionKind::CollectCoins, &mut currency), None);
    }

    #[test]
    fn test_sanitize_clamps_corrupt_values() {
        let mut missions = Missions::default();
        missions.run_distance.progress = -5.0;
        missions.collect_coins.current_level = 99;
        missions.sanitize();
        assert_eq!(missions.run_distance.progress, 0.0);
        assert_eq!(missions.collect_coins.current_level, COLLECT_COINS_TIERS.len());
    }
}
