//! Post-extraction business rules.
//!
//! These are policy, not structural correctness: a level cap changes with a
//! game patch, so it lives in a swappable check layered after extraction
//! rather than inside the parser. Plain `ingest` never applies them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_LEVEL_CAP;
use crate::record::DeathPayload;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("level {level} exceeds the cap of {cap}")]
    LevelAboveCap { level: u32, cap: u32 },
    #[error("fatal damage must be positive")]
    NonPositiveDamage,
}

/// Sanity checks applied to an assembled payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePolicy {
    pub level_cap: u32,
    pub require_positive_damage: bool,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self { level_cap: DEFAULT_LEVEL_CAP, require_positive_damage: true }
    }
}

impl RulePolicy {
    /// Check a payload, reporting the first violated rule.
    ///
    /// # Errors
    ///
    /// The corresponding [`RuleViolation`].
    pub fn check(&self, payload: &DeathPayload) -> Result<(), RuleViolation> {
        if payload.level > self.level_cap {
            return Err(RuleViolation::LevelAboveCap { level: payload.level, cap: self.level_cap });
        }
        if self.require_positive_damage && payload.damage_taken == 0 {
            return Err(RuleViolation::NonPositiveDamage);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::SkillIds;

    fn payload(level: u32, damage_taken: u64) -> DeathPayload {
        DeathPayload {
            level,
            damage_taken,
            career_seconds: 3600,
            career_runs: 4,
            career_kills: 85,
            career_elite_kills: 6,
            career_boss_kills: 2,
            career_gold: 350,
            career_soulstones: 7,
            last_run_kills: 50,
            last_run_regular_kills: 45,
            last_run_elite_kills: 4,
            last_run_boss_kills: 1,
            last_run_gold: 220,
            last_run_damage_dealt: 15000,
            last_run_duration: 300,
            skill_ids: SkillIds::new(),
        }
    }

    #[test]
    fn default_policy_accepts_a_sane_payload() {
        assert_eq!(RulePolicy::default().check(&payload(12, 999)), Ok(()));
    }

    #[test]
    fn rejects_level_above_cap() {
        let policy = RulePolicy { level_cap: 60, ..RulePolicy::default() };
        assert_eq!(
            policy.check(&payload(61, 999)),
            Err(RuleViolation::LevelAboveCap { level: 61, cap: 60 })
        );
    }

    #[test]
    fn rejects_zero_damage_unless_disabled() {
        let policy = RulePolicy::default();
        assert_eq!(policy.check(&payload(12, 0)), Err(RuleViolation::NonPositiveDamage));
        let lax = RulePolicy { require_positive_damage: false, ..policy };
        assert_eq!(lax.check(&payload(12, 0)), Ok(()));
    }
}
