use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{error, info};

use crate::error::{CropError, Result};
use crate::page_range::parse_page_indices;
use crate::pdf::PdfDocument;

/// Inserted before the extension of every output file.
const OUTPUT_SUFFIX: &str = "_cropped";

/// One queued source file and the page range to keep from it.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub range: String,
}

/// State for one cropping run: the queued files and the output directory.
/// Owned by the caller; nothing here is ambient or global.
#[derive(Debug)]
pub struct CropSession {
    pub entries: Vec<FileEntry>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub succeeded: u32,
    pub failed: u32,
    pub outcomes: Vec<FileOutcome>,
}

#[derive(Debug, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl CropSession {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        CropSession {
            entries: Vec::new(),
            output_dir: output_dir.into(),
        }
    }

    /// Queue a file. The default range keeps every page, written as the
    /// full-range string `1-<page_count>`.
    ///
    /// A file that cannot be opened is queued anyway with an empty range,
    /// so `process` counts it as failed alongside the rest; the open error
    /// is returned here for immediate reporting.
    pub fn add_file<P: Into<PathBuf>>(&mut self, path: P) -> Result<u32> {
        let path = path.into();
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let page_count = doc.page_count();
                self.entries.push(FileEntry {
                    path,
                    range: format!("1-{}", page_count),
                });
                Ok(page_count)
            }
            Err(err) => {
                self.entries.push(FileEntry {
                    path,
                    range: String::new(),
                });
                Err(err)
            }
        }
    }

    /// Crop every queued entry, continuing past per-file failures.
    ///
    /// Only a structural failure aborts early: the output directory not
    /// being creatable. Per-file failures end up in the summary.
    pub fn process(&self) -> Result<BatchSummary> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| CropError::WriteFailure {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut summary = BatchSummary::default();
        let mut claimed = HashSet::new();

        for entry in &self.entries {
            match self.process_entry(entry, &mut claimed) {
                Ok(output) => {
                    info!(
                        path = %entry.path.display(),
                        output = %output.display(),
                        "cropped"
                    );
                    summary.succeeded += 1;
                    summary.outcomes.push(FileOutcome {
                        path: entry.path.clone(),
                        output: Some(output),
                        error: None,
                    });
                }
                Err(err) => {
                    error!(path = %entry.path.display(), %err, "skipping file");
                    summary.failed += 1;
                    summary.outcomes.push(FileOutcome {
                        path: entry.path.clone(),
                        output: None,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        Ok(summary)
    }

    fn process_entry(&self, entry: &FileEntry, claimed: &mut HashSet<PathBuf>) -> Result<PathBuf> {
        let doc = PdfDocument::open(&entry.path)?;
        let indices = parse_page_indices(&entry.range, doc.page_count())?;
        let mut cropped = doc.select_pages(&indices)?;

        let output = self.claim_output_path(&entry.path, claimed);
        PdfDocument::save_atomic(&mut cropped, &output)?;
        Ok(output)
    }

    /// Output path for `source` inside the output directory. A basename
    /// already claimed earlier in this run gets a `-2`, `-3`, ... counter;
    /// files left by previous runs are overwritten.
    fn claim_output_path(&self, source: &Path, claimed: &mut HashSet<PathBuf>) -> PathBuf {
        let mut counter = 1;
        loop {
            let candidate = self.output_dir.join(cropped_name(source, counter));
            if claimed.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// File name for the cropped copy of `source`:
/// `report.pdf` -> `report_cropped.pdf`.
pub fn output_file_name(source: &Path) -> String {
    cropped_name(source, 1)
}

fn cropped_name(source: &Path, counter: u32) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let mut name = format!("{}{}", stem, OUTPUT_SUFFIX);
    if counter > 1 {
        name.push_str(&format!("-{}", counter));
    }
    if let Some(ext) = source.extension().and_then(|s| s.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    name
}
