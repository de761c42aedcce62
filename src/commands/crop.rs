use crate::page_range::parse_page_indices;
use crate::pdf::PdfDocument;
use crate::session;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output_dir: Q) -> Result<()> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let doc = PdfDocument::open(input)?;
    let indices = parse_page_indices(pages, doc.page_count())?;
    let mut cropped = doc.select_pages(&indices)?;

    let output = output_dir.join(session::output_file_name(input));
    PdfDocument::save_atomic(&mut cropped, &output)?;

    println!(
        "Cropped {} to {} page(s) at {}",
        input.display(),
        cropped.get_pages().len(),
        output.display()
    );

    Ok(())
}
