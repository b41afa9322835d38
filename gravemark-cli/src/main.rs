use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use gravemark_core::constants::DEFAULT_LEVEL_CAP;
use gravemark_core::{
    CareerTotalsPolicy, DeathRecord, IngestOptions, LoadoutPolicy, MemoryStore, RulePolicy,
    SubmitOutcome, SubmitterMeta, submit,
};

#[derive(Debug, Parser)]
#[command(name = "gravemark", version)]
#[command(about = "Convert a hardcore save snapshot into a canonical death record")]
struct Args {
    /// Path to the save snapshot (JSON)
    save: PathBuf,

    /// Submitter identity mixed into the dedup fingerprint
    #[arg(long)]
    submitter: String,

    /// Display name stored with the record
    #[arg(long, default_value = "Unknown Hero")]
    name: String,

    /// Zero-pad the skill loadout to a fixed width of five
    #[arg(long)]
    pad_loadout: bool,

    /// Default missing career totals to zero instead of failing
    #[arg(long)]
    lenient_career_totals: bool,

    /// Level cap enforced by the post-extraction rules
    #[arg(long, default_value_t = DEFAULT_LEVEL_CAP)]
    level_cap: u32,

    /// Emit the record as JSON instead of a console summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw_text = fs::read_to_string(&args.save)
        .with_context(|| format!("reading save file {}", args.save.display()))?;
    log::debug!("read {} bytes from {}", raw_text.len(), args.save.display());

    let opts = IngestOptions {
        loadout: if args.pad_loadout { LoadoutPolicy::ZeroPad } else { LoadoutPolicy::DropEmpty },
        career_totals: if args.lenient_career_totals {
            CareerTotalsPolicy::DefaultZero
        } else {
            CareerTotalsPolicy::Strict
        },
    };
    let rules = RulePolicy { level_cap: args.level_cap, ..RulePolicy::default() };
    let meta = SubmitterMeta { submitter_id: args.submitter, display_name: args.name };

    // Dry-run store: shows what would be inserted; real persistence is the
    // leaderboard backend's job.
    let store = MemoryStore::new();
    let outcome = submit(&store, &raw_text, &meta, &opts, &rules).context("ingesting save")?;

    match outcome {
        SubmitOutcome::Inserted(record) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_summary(&record);
            }
        }
        SubmitOutcome::Duplicate => {
            println!("{}", "This save has already been submitted.".yellow());
        }
    }
    Ok(())
}

fn print_summary(record: &DeathRecord) {
    let p = &record.payload;
    println!("{}", "== Death Record ==".red().bold());
    println!("{} {} (level {})", "Fallen:".bold(), record.display_name, p.level);
    println!("{} {} damage", "Fatal blow:".bold(), p.damage_taken);
    println!(
        "{} {} kills ({} elite, {} boss) across {} runs",
        "Career:".bold(),
        p.career_kills,
        p.career_elite_kills,
        p.career_boss_kills,
        p.career_runs,
    );
    println!(
        "{} {}s played, {} gold, {} soulstones",
        "Totals:".bold(),
        p.career_seconds,
        p.career_gold,
        p.career_soulstones,
    );
    println!(
        "{} {} kills, {} gold, {} dealt in {}s",
        "Final run:".bold(),
        p.last_run_kills,
        p.last_run_gold,
        p.last_run_damage_dealt,
        p.last_run_duration,
    );
    let skills: Vec<String> = p.skill_ids.iter().map(ToString::to_string).collect();
    println!("{} [{}]", "Loadout:".bold(), skills.join(", "));
    println!("{} {}", "Fingerprint:".bold(), record.fingerprint.dimmed());
}
