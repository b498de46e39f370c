use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use nf_engine::{Response, ResponseType, Scenario, ThreatTier};
use nf_game::{GameSession, RoundReport, SaveFile, Verdict};

use super::{colored_shift, game_config, open_library};

pub struct PlayOptions {
    pub seed: u64,
    pub content: Option<PathBuf>,
    pub language: String,
    pub rounds: Option<u32>,
    pub save: Option<PathBuf>,
    pub resume: bool,
}

const HELP: &str = "\
  fact       Fact-Check (2 manpower)
  thorough   Thorough Fact-Check (4 manpower)
  prebunk    Pre-Bunk (3 manpower)
  counter    Counter-Narrative (3 manpower)
  discredit  Discredit Source (2 manpower)
  ignore     Ignore (free)
  clear      Drop all selected responses
  status     Show the current selection
  go         Commit the selection (nothing selected = ignore)
  save       Save the game
  quit       Leave the game";

pub fn run(opts: &PlayOptions) -> Result<(), String> {
    let library = open_library(opts.content.as_deref())?;
    let config = game_config(opts.seed, &opts.language, opts.rounds);
    let slot = opts.save.as_ref().map(SaveFile::new);

    let mut session = match &slot {
        Some(slot) if opts.resume => {
            let saved = slot.load().map_err(|e| e.to_string())?;
            println!(
                "  {} game saved {}",
                "Resuming".bold(),
                saved.saved_at.format("%Y-%m-%d %H:%M")
            );
            GameSession::from_saved(library, config, saved)
        }
        _ => GameSession::new(library, config),
    }
    .map_err(|e| format!("failed to start game: {e}"))?;

    if session.state().is_over() {
        print_verdict(&session);
        return Ok(());
    }

    println!("  {} Narrative Front | Seed: {}", "Starting".bold(), opts.seed);
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    print_round(&mut session)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut selection: Vec<Response> = Vec::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim().to_lowercase();
        if input.is_empty() {
            continue;
        }

        if let Some(response) = parse_response(&input) {
            let spent: u32 = selection.iter().map(|r| r.manpower_cost).sum();
            let available = session.state().manpower;
            if spent + response.manpower_cost > available {
                println!(
                    "{}\n",
                    format!(
                        "Not enough manpower: {} selected, {} more needed, {available} available.",
                        spent, response.manpower_cost
                    )
                    .yellow()
                );
            } else {
                selection.push(response);
                print_selection(&selection, available);
            }
            continue;
        }

        match input.as_str() {
            "help" | "h" | "?" => println!("{HELP}\n"),
            "clear" => {
                selection.clear();
                print_selection(&selection, session.state().manpower);
            }
            "status" => print_selection(&selection, session.state().manpower),
            "go" | "commit" => {
                let report = session
                    .submit(std::mem::take(&mut selection))
                    .map_err(|e| e.to_string())?;
                print_report(&report);
                if let Some(slot) = &slot {
                    slot.save(session.state()).map_err(|e| e.to_string())?;
                }
                if report.finished {
                    print_verdict(&session);
                    break;
                }
                print_round(&mut session)?;
            }
            "save" => match &slot {
                Some(slot) => {
                    slot.save(session.state()).map_err(|e| e.to_string())?;
                    println!("  Saved to {}\n", slot.path().display());
                }
                None => println!("{}\n", "No save file. Start with --save FILE.".yellow()),
            },
            "quit" | "q" | "exit" => break,
            other => println!(
                "{}\n",
                format!("Unknown command '{other}'. Type 'help' for commands.").yellow()
            ),
        }
    }

    Ok(())
}

fn parse_response(input: &str) -> Option<Response> {
    let response = match input {
        "fact" | "fc" => Response::basic(ResponseType::FactCheck),
        "thorough" => Response::thorough(ResponseType::FactCheck),
        "prebunk" | "pb" => Response::basic(ResponseType::PreBunk),
        "counter" | "cn" => Response::basic(ResponseType::CounterNarrative),
        "discredit" | "ds" => Response::basic(ResponseType::DiscreditSource),
        "ignore" => Response::basic(ResponseType::Ignore),
        _ => return None,
    };
    Some(response)
}

fn print_round(session: &mut GameSession) -> Result<(), String> {
    let scenario = session.current_scenario().map_err(|e| e.to_string())?;
    let state = session.state();
    let header = format!("Round {}/{}", state.round + 1, session.config().total_rounds);
    println!(
        "  {}  |  Meter {}  |  Manpower {}",
        header.bold(),
        colored_shift(state.meter),
        state.manpower
    );
    print_scenario(&scenario);
    Ok(())
}

fn print_scenario(scenario: &Scenario) {
    if let Some(intro) = &scenario.framing.intro {
        println!("  {}", intro.italic().dimmed());
    }
    println!();
    println!("  {}", scenario.inject.bold());
    println!();
    if let Some(intel) = &scenario.intelligence {
        println!(
            "  Active {}h | Bots {:.0}% | Damage {}/10 | Resonance {}/10 | Veracity: {} | Threat: {} ({:.1})",
            intel.hours_active,
            intel.bot_amplification,
            intel.damage_potential,
            intel.emotional_resonance,
            intel.veracity,
            threat_label(intel.threat_tier()),
            intel.threat_level()
        );
        println!();
    }
}

fn threat_label(tier: ThreatTier) -> colored::ColoredString {
    let text = tier.to_string();
    match tier {
        ThreatTier::Critical => text.red().bold(),
        ThreatTier::High => text.yellow(),
        ThreatTier::Moderate => text.normal(),
    }
}

fn print_selection(selection: &[Response], available: u32) {
    if selection.is_empty() {
        println!("  Selected: {}\n", "(none, will ignore)".dimmed());
        return;
    }
    let names: Vec<String> = selection
        .iter()
        .map(|r| {
            if r.is_thorough() {
                format!("{} (thorough)", r.kind)
            } else {
                r.kind.to_string()
            }
        })
        .collect();
    let spent: u32 = selection.iter().map(|r| r.manpower_cost).sum();
    println!("  Selected: {} [{spent}/{available} manpower]\n", names.join(", "));
}

fn print_report(report: &RoundReport) {
    println!();
    for resolution in &report.outcome.resolutions {
        let label = match resolution.bucket {
            Some(bucket) if bucket.is_critical() => format!("{bucket}").magenta().bold(),
            Some(bucket) => format!("{bucket}").normal(),
            None => "--".dimmed(),
        };
        let entry = &resolution.entry;
        println!("  [{label}] {} ({})", entry.text, colored_shift(entry.shift));
    }
    if let Some(entry) = report.outcome.synergy() {
        println!(
            "  [{}] {} ({})",
            "Combined".cyan(),
            entry.text,
            colored_shift(entry.shift)
        );
    }
    println!();
    println!(
        "  Meter shift {}  |  Meter {}  |  Manpower {}",
        colored_shift(report.outcome.meter_shift),
        colored_shift(report.meter),
        report.manpower
    );
    if let Some(outro) = &report.scenario.framing.outro {
        println!("  {}", outro.italic().dimmed());
    }
    println!();
}

fn print_verdict(session: &GameSession) {
    let verdict = session.verdict();
    let label = match verdict {
        Verdict::Victory => verdict.to_string().green().bold(),
        Verdict::Defeat => verdict.to_string().red().bold(),
        Verdict::Stalemate => verdict.to_string().yellow().bold(),
    };
    println!("  {} Final meter {}", label, colored_shift(session.state().meter));
    println!("  {} rounds played.", session.state().history.len());
}
