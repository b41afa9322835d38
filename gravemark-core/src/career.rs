//! Lifetime totals folded across the whole run history.

use serde_json::Value;

use crate::policy;
use crate::run::{STAT_AGGREGATORS, STAT_COUNTERS};
use crate::stats::lookup_optional;

/// Running totals across every recorded run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CareerTotals {
    pub gold: f64,
    pub soulstones: f64,
    pub kills: f64,
    pub elite_kills: f64,
    pub boss_kills: f64,
}

/// Fold stats across all of `pastRunsData`, current death included.
///
/// Every lookup is optional: a historical run missing a stat block
/// contributes zero rather than blocking ingestion of the current death.
/// The result is a plain sum, so run order does not matter.
#[must_use]
pub fn aggregate_career(runs: &[Value]) -> CareerTotals {
    let mut totals = CareerTotals::default();
    for run in runs {
        let counters = run.get(STAT_COUNTERS);
        let aggregators = run.get(STAT_AGGREGATORS);
        totals.gold += lookup_optional(aggregators, policy::GOLD_GAINED.key);
        totals.soulstones += lookup_optional(counters, policy::SOULSTONES.key);
        totals.kills += lookup_optional(counters, policy::ENEMIES_DEFEATED.key);
        totals.elite_kills += lookup_optional(counters, policy::ELITE_KILLS.key);
        totals.boss_kills += lookup_optional(counters, policy::BOSS_KILLS.key);
    }
    totals
}
