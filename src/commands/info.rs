use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let info = doc.info();

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", info.page_count);

    if let Some(title) = &info.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &info.author {
        println!("Author: {}", author);
    }
    if let Some(creation_date) = &info.creation_date {
        println!("Created: {}", format_pdf_date(creation_date));
    }

    Ok(())
}

/// Render a PDF date (D:YYYYMMDDHHmmSS...) as YYYY-MM-DD HH:MM:SS
fn format_pdf_date(date: &str) -> String {
    if let Some(d) = date.strip_prefix("D:") {
        if d.len() >= 8 && d[..8].bytes().all(|b| b.is_ascii_digit()) {
            let time = if d.len() >= 14 && d[8..14].bytes().all(|b| b.is_ascii_digit()) {
                format!(" {}:{}:{}", &d[8..10], &d[10..12], &d[12..14])
            } else {
                String::new()
            };
            return format!("{}-{}-{}{}", &d[0..4], &d[4..6], &d[6..8], time);
        }
    }
    date.to_string()
}
