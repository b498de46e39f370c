use std::path::Path;

use nf_game::SaveFile;

pub fn run(file: &Path, format: &str) -> Result<(), String> {
    let saved = SaveFile::new(file).load().map_err(|e| e.to_string())?;
    let history = &saved.state.history;

    let output = match format {
        "markdown" | "md" => history.export_markdown(),
        "text" | "txt" => history.export_text(),
        "json" => serde_json::to_string_pretty(history)
            .map_err(|e| format!("JSON serialization error: {e}"))?,
        other => {
            return Err(format!(
                "unknown format '{other}' (expected markdown, text, or json)"
            ));
        }
    };

    if history.is_empty() {
        println!("  No rounds played yet.");
    } else {
        print!("{output}");
    }
    Ok(())
}
