//! Stat extraction from the final, fatal run.

use serde_json::Value;

use crate::error::IngestError;
use crate::policy::{self, FieldPolicy, FieldSpec, StatSource};
use crate::stats;

pub const STAT_COUNTERS: &str = "_statCounters";
pub const STAT_AGGREGATORS: &str = "_statAggregators";
pub const DAMAGE_HISTORY: &str = "_damageHistory";
pub const TOTAL_DAMAGE: &str = "_totalDamage";

/// Raw metrics pulled from one run entry, numeric exactly as the save
/// reports them. Clamping and integer conversion happen at assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalRunStats {
    pub level: f64,
    pub kills: f64,
    pub regular_kills: f64,
    pub elite_kills: f64,
    pub boss_kills: f64,
    pub soulstones: f64,
    pub gold: f64,
    pub damage_dealt: f64,
    pub duration: f64,
    pub damage_taken: f64,
}

/// Read one stat from a run entry per its policy-table row.
fn stat(run: &Value, spec: &FieldSpec) -> Result<f64, IngestError> {
    let owner = match spec.source {
        StatSource::Counters => run.get(STAT_COUNTERS),
        StatSource::Aggregators => run.get(STAT_AGGREGATORS),
    };
    match spec.policy {
        FieldPolicy::Required => stats::lookup_required(owner, spec.key),
        FieldPolicy::Optional => Ok(stats::lookup_optional(owner, spec.key)),
    }
}

/// Damage of the fatal blow: the `_totalDamage` of the run's last damage
/// instance.
fn fatal_damage(run: &Value) -> Result<f64, IngestError> {
    let last = run
        .get(DAMAGE_HISTORY)
        .and_then(Value::as_array)
        .and_then(|history| history.last())
        .ok_or(IngestError::NoDamageHistory)?;
    last.get(TOTAL_DAMAGE)
        .and_then(Value::as_f64)
        .ok_or(IngestError::MissingField(TOTAL_DAMAGE))
}

/// Extract the death-run metrics from one entry of `pastRunsData` (callers
/// pass the last entry, the run in which the character died).
///
/// A level of `0` means "unset" in older saves; a character that reached
/// combat is at least level 1, so it is clamped.
///
/// # Errors
///
/// [`IngestError::MissingField`] for absent required stats and
/// [`IngestError::NoDamageHistory`] when the run carries no damage instances.
pub fn extract_final_run(run: &Value) -> Result<FinalRunStats, IngestError> {
    let mut level = stat(run, &policy::LEVEL_ACHIEVED)?;
    if level == 0.0 {
        level = 1.0;
    }
    Ok(FinalRunStats {
        level,
        kills: stat(run, &policy::ENEMIES_DEFEATED)?,
        regular_kills: stat(run, &policy::REGULAR_KILLS)?,
        elite_kills: stat(run, &policy::ELITE_KILLS)?,
        boss_kills: stat(run, &policy::BOSS_KILLS)?,
        soulstones: stat(run, &policy::SOULSTONES)?,
        gold: stat(run, &policy::GOLD_GAINED)?,
        damage_dealt: stat(run, &policy::DAMAGE_DEALT)?,
        duration: stat(run, &policy::RUN_TIME)?,
        damage_taken: fatal_damage(run)?,
    })
}
