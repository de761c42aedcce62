pub mod document;

#[cfg(test)]
pub mod testutil;

pub use document::PdfDocument;
