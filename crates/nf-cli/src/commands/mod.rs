pub mod check;
pub mod history;
pub mod play;
pub mod simulate;

use std::path::Path;

use nf_game::{ContentLibrary, GameConfig};

/// Open the content pack at `dir`, or the built-in pack.
fn open_library(dir: Option<&Path>) -> Result<ContentLibrary, String> {
    let library = match dir {
        Some(dir) => ContentLibrary::from_dir(dir),
        None => ContentLibrary::builtin(),
    };
    library.map_err(|e| format!("failed to open content: {e}"))
}

/// Game configuration with the CLI overrides applied.
fn game_config(seed: u64, language: &str, rounds: Option<u32>) -> GameConfig {
    let config = GameConfig::default().with_seed(seed).with_language(language);
    match rounds {
        Some(rounds) => config.with_rounds(rounds),
        None => config,
    }
}

/// Format a meter value with its sign and a color for its direction.
fn colored_shift(shift: i32) -> colored::ColoredString {
    use colored::Colorize;

    let text = format!("{shift:+}");
    match shift {
        1.. => text.green(),
        0 => text.normal(),
        _ => text.red(),
    }
}
