//! The canonical death payload and its assembly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::career::CareerTotals;
use crate::error::IngestError;
use crate::loadout::SkillIds;
use crate::policy::{CareerTotalsPolicy, IngestOptions};
use crate::run::FinalRunStats;

pub const GAMEPLAY_TIME: &str = "gameplayTime";
pub const TOTAL_RUNS: &str = "cumulativeTotalRuns";

/// Canonical, persistable description of one hardcore death.
///
/// Every numeric field is non-negative, `level` is at least 1, and
/// `skill_ids` holds at most five entries; the assembler enforces all three
/// regardless of what the save reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathPayload {
    pub level: u32,
    /// Damage of the fatal blow.
    pub damage_taken: u64,
    pub career_seconds: u64,
    pub career_runs: u64,
    pub career_kills: u64,
    pub career_elite_kills: u64,
    pub career_boss_kills: u64,
    pub career_gold: u64,
    pub career_soulstones: u64,
    pub last_run_kills: u64,
    pub last_run_regular_kills: u64,
    pub last_run_elite_kills: u64,
    pub last_run_boss_kills: u64,
    pub last_run_gold: u64,
    pub last_run_damage_dealt: u64,
    pub last_run_duration: u64,
    pub skill_ids: SkillIds,
}

/// Clamp a raw save number to an unsigned count. Negative, NaN, and infinite
/// inputs read as zero; fractional parts are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn level_of(value: f64) -> u32 {
    let clamped = count(value).min(u64::from(u32::MAX)) as u32;
    clamped.max(1)
}

fn career_total(
    doc: &Value,
    key: &'static str,
    policy: CareerTotalsPolicy,
) -> Result<f64, IngestError> {
    match doc.get(key).and_then(Value::as_f64) {
        Some(value) => Ok(value),
        None => match policy {
            CareerTotalsPolicy::Strict => Err(IngestError::MissingField(key)),
            CareerTotalsPolicy::DefaultZero => Ok(0.0),
        },
    }
}

/// Combine the extraction results with the top-level career totals into one
/// payload.
///
/// # Errors
///
/// Under [`CareerTotalsPolicy::Strict`], [`IngestError::MissingField`] when
/// `gameplayTime` or `cumulativeTotalRuns` is absent or non-numeric.
pub fn assemble(
    doc: &Value,
    final_run: &FinalRunStats,
    career: &CareerTotals,
    skill_ids: SkillIds,
    opts: &IngestOptions,
) -> Result<DeathPayload, IngestError> {
    let career_seconds = career_total(doc, GAMEPLAY_TIME, opts.career_totals)?;
    let career_runs = career_total(doc, TOTAL_RUNS, opts.career_totals)?;
    Ok(DeathPayload {
        level: level_of(final_run.level),
        damage_taken: count(final_run.damage_taken),
        career_seconds: count(career_seconds),
        career_runs: count(career_runs),
        career_kills: count(career.kills),
        career_elite_kills: count(career.elite_kills),
        career_boss_kills: count(career.boss_kills),
        career_gold: count(career.gold),
        career_soulstones: count(career.soulstones),
        last_run_kills: count(final_run.kills),
        last_run_regular_kills: count(final_run.regular_kills),
        last_run_elite_kills: count(final_run.elite_kills),
        last_run_boss_kills: count(final_run.boss_kills),
        last_run_gold: count(final_run.gold),
        last_run_damage_dealt: count(final_run.damage_dealt),
        last_run_duration: count(final_run.duration),
        skill_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::LoadoutPolicy;
    use serde_json::json;
    use smallvec::smallvec;

    fn final_run() -> FinalRunStats {
        FinalRunStats {
            level: 12.0,
            kills: 50.0,
            regular_kills: 45.0,
            elite_kills: 4.0,
            boss_kills: 1.0,
            soulstones: 3.0,
            gold: 220.0,
            damage_dealt: 15000.0,
            duration: 300.0,
            damage_taken: 999.0,
        }
    }

    fn career() -> CareerTotals {
        CareerTotals { gold: 350.0, soulstones: 7.0, kills: 85.0, elite_kills: 6.0, boss_kills: 2.0 }
    }

    #[test]
    fn assembles_all_fields() {
        let doc = json!({ "gameplayTime": 3600, "cumulativeTotalRuns": 4 });
        let skills: SkillIds = smallvec![5, 7];
        let payload =
            assemble(&doc, &final_run(), &career(), skills, &IngestOptions::default()).unwrap();
        assert_eq!(payload.level, 12);
        assert_eq!(payload.damage_taken, 999);
        assert_eq!(payload.career_seconds, 3600);
        assert_eq!(payload.career_runs, 4);
        assert_eq!(payload.career_kills, 85);
        assert_eq!(payload.last_run_duration, 300);
        assert_eq!(payload.skill_ids.as_slice(), &[5, 7]);
    }

    #[test]
    fn strict_policy_fails_on_missing_top_level_totals() {
        let doc = json!({ "cumulativeTotalRuns": 4 });
        let err = assemble(&doc, &final_run(), &career(), SkillIds::new(), &IngestOptions::default())
            .unwrap_err();
        assert_eq!(err, IngestError::MissingField("gameplayTime"));

        let doc = json!({ "gameplayTime": 3600, "cumulativeTotalRuns": "4" });
        let err = assemble(&doc, &final_run(), &career(), SkillIds::new(), &IngestOptions::default())
            .unwrap_err();
        assert_eq!(err, IngestError::MissingField("cumulativeTotalRuns"));
    }

    #[test]
    fn lenient_policy_defaults_top_level_totals_to_zero() {
        let opts = IngestOptions {
            career_totals: CareerTotalsPolicy::DefaultZero,
            loadout: LoadoutPolicy::DropEmpty,
        };
        let payload =
            assemble(&json!({}), &final_run(), &career(), SkillIds::new(), &opts).unwrap();
        assert_eq!(payload.career_seconds, 0);
        assert_eq!(payload.career_runs, 0);
    }

    #[test]
    fn negative_and_fractional_inputs_are_clamped() {
        let doc = json!({ "gameplayTime": -5, "cumulativeTotalRuns": 4.9 });
        let mut stats = final_run();
        stats.kills = -3.0;
        stats.level = -2.0;
        let payload =
            assemble(&doc, &stats, &career(), SkillIds::new(), &IngestOptions::default()).unwrap();
        assert_eq!(payload.career_seconds, 0);
        assert_eq!(payload.career_runs, 4);
        assert_eq!(payload.last_run_kills, 0);
        // A nonsensical level still lands at the minimum legitimate value.
        assert_eq!(payload.level, 1);
    }
}
