use crate::session::CropSession;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

pub fn run(inputs: &[PathBuf], ranges: &[String], output_dir: &Path, json: bool) -> Result<()> {
    let files = collect_pdf_files(inputs)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found in the given inputs");
    }

    let mut session = CropSession::new(output_dir);
    for (i, path) in files.iter().enumerate() {
        if let Err(err) = session.add_file(path) {
            warn!(path = %path.display(), %err, "queued unreadable file");
        } else if let Some(range) = range_for(ranges, i) {
            if let Some(entry) = session.entries.last_mut() {
                entry.range = range.to_string();
            }
        }
    }

    let summary = session.process()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for outcome in &summary.outcomes {
        match (&outcome.output, &outcome.error) {
            (Some(output), _) => println!("{} -> {}", outcome.path.display(), output.display()),
            (None, Some(reason)) => println!("{}: FAILED: {}", outcome.path.display(), reason),
            (None, None) => {}
        }
    }
    println!(
        "\n{} file(s) cropped into {}, {} failed.",
        summary.succeeded,
        output_dir.display(),
        summary.failed
    );

    Ok(())
}

/// A single --pages value applies to every file; several match inputs by
/// position, with missing trailing values defaulting to the full range.
fn range_for(ranges: &[String], index: usize) -> Option<&String> {
    match ranges {
        [single] => Some(single),
        _ => ranges.get(index),
    }
}

/// Expand directory inputs into the PDF files they contain.
fn collect_pdf_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| {
                    path.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
                })
                .collect();
            found.sort();
            if found.is_empty() {
                warn!(dir = %input.display(), "no PDF files found in directory");
            }
            files.extend(found);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            anyhow::bail!("Input does not exist: {}", input.display());
        }
    }
    Ok(files)
}
