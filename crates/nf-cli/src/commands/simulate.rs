use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nf_engine::{Bucket, SynergyKind};
use nf_game::{BalanceReport, Policy, simulate};

use super::{game_config, open_library};

pub struct SimulateOptions {
    pub content: Option<PathBuf>,
    pub games: u32,
    pub seed: u64,
    pub policy: Option<String>,
    pub language: String,
    pub rounds: Option<u32>,
}

pub fn run(opts: &SimulateOptions) -> Result<(), String> {
    let games = opts.games;
    let seed = opts.seed;
    let policies = match opts.policy.as_deref() {
        Some(name) => vec![Policy::parse(name).ok_or_else(|| {
            format!("unknown policy '{name}' (expected passive, fact-check, or random)")
        })?],
        None => Policy::all().to_vec(),
    };

    let library = open_library(opts.content.as_deref())?;
    let config = game_config(seed, &opts.language, opts.rounds);

    let mut reports = Vec::new();
    for policy in policies {
        let report = simulate(&library, &config, policy, games)
            .map_err(|e| format!("simulation failed: {e}"))?;
        reports.push((policy, report));
    }

    println!(
        "  {} {}",
        "Balance".bold(),
        format!(
            "({games} games per policy, {} rounds, language={}, seed={seed})",
            config.total_rounds, config.language
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Policy",
        "Victory",
        "Stalemate",
        "Defeat",
        "Avg meter",
        "Win rate",
    ]);
    for (policy, report) in &reports {
        table.add_row(vec![
            policy.to_string(),
            report.victories.to_string(),
            report.stalemates.to_string(),
            report.defeats.to_string(),
            format!("{:+.2}", report.average_final_meter()),
            percent(report.victory_rate()),
        ]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Rolls".bold().underline());
    println!();
    let mut rolls = Table::new();
    rolls.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Policy".to_string()];
    header.extend(Bucket::all().iter().map(ToString::to_string));
    rolls.set_header(header);
    for (policy, report) in &reports {
        let mut row = vec![policy.to_string()];
        row.extend(Bucket::all().iter().map(|b| percent(report.bucket_rate(*b))));
        rolls.add_row(row);
    }
    println!("{rolls}");

    if reports.iter().any(|(_, r)| !r.synergies.is_empty()) {
        println!();
        println!("  {}", "Combinations".bold().underline());
        println!();
        for (policy, report) in &reports {
            print_synergies(*policy, report);
        }
    }

    Ok(())
}

fn print_synergies(policy: Policy, report: &BalanceReport) {
    for kind in SynergyKind::all() {
        if let Some(count) = report.synergies.get(kind) {
            println!(
                "  {:<12} {:<32} {count} ({:.1} per game)",
                policy.to_string(),
                kind.to_string(),
                f64::from(*count) / f64::from(report.games.max(1))
            );
        }
    }
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}
