//! Field classification and per-ingestion options.
//!
//! Strictness for individual stat fields has drifted across game patches.
//! Every final-run field is one row in a policy table, so adapting to a new
//! patch means editing the table, not the extraction control flow.

use serde::{Deserialize, Serialize};

/// Which stat-bearing object of a run entry a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatSource {
    Counters,
    Aggregators,
}

/// Whether absence of a field aborts ingestion or reads as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    Required,
    Optional,
}

/// One row of the field-policy table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub source: StatSource,
    pub policy: FieldPolicy,
}

const fn counter(key: &'static str, policy: FieldPolicy) -> FieldSpec {
    FieldSpec { key, source: StatSource::Counters, policy }
}

const fn aggregator(key: &'static str, policy: FieldPolicy) -> FieldSpec {
    FieldSpec { key, source: StatSource::Aggregators, policy }
}

pub const LEVEL_ACHIEVED: FieldSpec = counter("LevelAchieved", FieldPolicy::Required);
pub const ENEMIES_DEFEATED: FieldSpec = counter("EnemiesDefeated", FieldPolicy::Optional);
pub const REGULAR_KILLS: FieldSpec = counter("RegularEnemiesDefeated", FieldPolicy::Optional);
pub const ELITE_KILLS: FieldSpec = counter("EliteEnemiesDefeated", FieldPolicy::Optional);
pub const BOSS_KILLS: FieldSpec = counter("BossesDefeated", FieldPolicy::Optional);
pub const SOULSTONES: FieldSpec = counter("SoulstonesCollected", FieldPolicy::Optional);
pub const GOLD_GAINED: FieldSpec = aggregator("GoldGained", FieldPolicy::Optional);
pub const DAMAGE_DEALT: FieldSpec = aggregator("DamageDealt", FieldPolicy::Optional);
pub const RUN_TIME: FieldSpec = aggregator("RunTime", FieldPolicy::Required);

/// The complete policy table for fields read from the final run.
pub const FINAL_RUN_FIELDS: &[FieldSpec] = &[
    LEVEL_ACHIEVED,
    ENEMIES_DEFEATED,
    REGULAR_KILLS,
    ELITE_KILLS,
    BOSS_KILLS,
    SOULSTONES,
    GOLD_GAINED,
    DAMAGE_DEALT,
    RUN_TIME,
];

/// Empty-slot handling for the loadout resolver.
///
/// Recorded pipeline revisions disagree on this; both behaviors survive as an
/// explicit choice and downstream consumers must tolerate variable length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadoutPolicy {
    /// Drop empty slots; output is variable-length, at most five entries.
    #[default]
    DropEmpty,
    /// Pad with `0` after the equipped ids up to a fixed width of five.
    ZeroPad,
}

/// Handling of the two required top-level career totals
/// (`gameplayTime`, `cumulativeTotalRuns`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerTotalsPolicy {
    /// Absence fails ingestion with the field name.
    #[default]
    Strict,
    /// Absence reads as zero, matching the lenient pipeline revisions.
    DefaultZero,
}

/// Per-ingestion configuration for the policy points that have drifted
/// across pipeline revisions. Defaults are the canonical strict choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestOptions {
    pub loadout: LoadoutPolicy,
    pub career_totals: CareerTotalsPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_level_and_run_time_are_required() {
        let required: Vec<&str> = FINAL_RUN_FIELDS
            .iter()
            .filter(|spec| spec.policy == FieldPolicy::Required)
            .map(|spec| spec.key)
            .collect();
        assert_eq!(required, vec!["LevelAchieved", "RunTime"]);
    }

    #[test]
    fn defaults_are_the_strict_revision() {
        let opts = IngestOptions::default();
        assert_eq!(opts.loadout, LoadoutPolicy::DropEmpty);
        assert_eq!(opts.career_totals, CareerTotalsPolicy::Strict);
    }
}
