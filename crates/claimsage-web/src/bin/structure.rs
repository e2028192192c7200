//! Batch structuring pass: raw patent text files in, patents.json out.
//!
//! Usage: cargo run -p claimsage-web --bin structure [input_dir] [output_file]
//!
//! Input files are plain text, one patent each, with form feeds as page
//! breaks. The output is the JSON array the corpus loads at startup.

use std::fs;
use std::path::{Path, PathBuf};

use claimsage_common::records::PatentRecord;
use claimsage_extract::structure_patent;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let input_dir = args.get(1).map(String::as_str).unwrap_or("data/text");
    let output = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("data/processed/patents.json");

    let inputs = text_files(Path::new(input_dir))?;
    if inputs.is_empty() {
        anyhow::bail!("no .txt files found in {input_dir}");
    }
    info!(files = inputs.len(), input_dir, "structuring patent documents");

    let tasks: Vec<_> = inputs
        .into_iter()
        .map(|path| tokio::task::spawn_blocking(move || structure_file(&path)))
        .collect();

    let mut records: Vec<PatentRecord> = Vec::new();
    for task in futures::future::join_all(tasks).await {
        match task? {
            Ok(record) => records.push(record),
            Err(err) => error!(%err, "skipping file"),
        }
    }

    if let Some(parent) = Path::new(output).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, serde_json::to_string_pretty(&records)?)?;
    info!(patents = records.len(), output, "wrote structured corpus");
    Ok(())
}

fn text_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

fn structure_file(path: &Path) -> anyhow::Result<PatentRecord> {
    let text = fs::read_to_string(path)?;
    // Form feeds are page breaks in the extracted text.
    let num_pages = text.matches('\u{c}').count() as u32 + 1;
    let fallback_id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("unknown");

    let mut record = structure_patent(&text, fallback_id, num_pages);
    record.source_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(String::from);
    Ok(record)
}
