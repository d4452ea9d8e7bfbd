use std::path::Path;

use crate::OutputFormat;

pub fn run(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let parsed = vocab_utils::load_corpus(path)?;

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "path": path.display().to_string(),
                "entries": parsed.entries.len(),
                "hadHeader": parsed.had_header,
                "skippedRows": parsed.skipped_rows,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}: {} entries{}, {} rows skipped",
                path.display(),
                parsed.entries.len(),
                if parsed.had_header { " after a header" } else { "" },
                parsed.skipped_rows
            );
            for entry in parsed.entries.iter().take(5) {
                println!("  {} = {}", entry.term, entry.translation);
            }
            if parsed.entries.len() > 5 {
                println!("  ...");
            }
        }
    }
    Ok(())
}
