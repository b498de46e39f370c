use std::path::Path;

use colored::Colorize;

use super::open_library;

pub fn run(
    content: Option<&Path>,
    language: &str,
    against: Option<&str>,
    rounds: Option<u32>,
) -> Result<(), String> {
    let mut library = open_library(content)?;
    let rounds = rounds.unwrap_or(nf_game::GameConfig::default().total_rounds);

    let manifest = library.manifest();
    let enabled = manifest.enabled().count();
    match manifest.default_campaign() {
        Ok(campaign) if campaign.enabled => {}
        Ok(campaign) => println!(
            "  {} default campaign '{}' is disabled",
            "WARN".yellow().bold(),
            campaign.id
        ),
        Err(e) => println!("  {} {e}", "WARN".yellow().bold()),
    }

    let mut problems = library.validate(language, rounds);

    if let Some(other) = against {
        match (library.registry(language), library.registry(other)) {
            (Ok(base), Ok(compare)) => {
                problems.extend(
                    base.parity_issues(&compare)
                        .into_iter()
                        .map(|issue| format!("parity {language}/{other}: {issue}")),
                );
            }
            (_, Err(e)) => problems.push(format!("{other}: {e}")),
            (Err(_), Ok(_)) => {}
        }
        if other != language {
            problems.extend(library.validate(other, rounds));
        }
    }

    for problem in &problems {
        println!("  {} {problem}", "ERROR".red().bold());
    }

    if !problems.is_empty() {
        return Err(format!(
            "{} problem{} found in {}",
            problems.len(),
            if problems.len() == 1 { "" } else { "s" },
            library.source()
        ));
    }

    println!("  All checks passed for {}.", library.source());
    println!(
        "  {rounds} scenarios, {enabled} enabled campaign{}, language{} {}",
        if enabled == 1 { "" } else { "s" },
        if against.is_some() { "s" } else { "" },
        match against {
            Some(other) => format!("{language}, {other}"),
            None => language.to_string(),
        }
    );
    Ok(())
}
