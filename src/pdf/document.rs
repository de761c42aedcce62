use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object};
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::{CropError, Result};

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let doc = Document::load(&path).map_err(|source| CropError::UnreadableSource {
            path: path.clone(),
            source,
        })?;
        Ok(PdfDocument { doc, path })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Build a new document containing only the pages at the given
    /// zero-based indices, ascending, with page content untouched.
    ///
    /// Indices past the end of the document are skipped with a warning
    /// rather than failing the file; they can only appear when the source
    /// changed on disk after its page count was read.
    pub fn select_pages(&self, indices: &[u32]) -> Result<Document> {
        let total = self.page_count();
        if total == 0 {
            return Err(CropError::EmptySource {
                path: self.path.clone(),
            });
        }

        // lopdf numbers pages from 1
        let mut keep = Vec::with_capacity(indices.len());
        for &index in indices {
            if index < total {
                keep.push(index + 1);
            } else {
                warn!(
                    index,
                    total,
                    path = %self.path.display(),
                    "skipping page index past end of document"
                );
            }
        }

        if keep.is_empty() {
            return Err(CropError::EmptySelection {
                path: self.path.clone(),
            });
        }

        let mut cropped = self.doc.clone();
        let delete: Vec<u32> = (1..=total).filter(|n| !keep.contains(n)).collect();
        if !delete.is_empty() {
            cropped.delete_pages(&delete);
        }
        cropped.prune_objects();

        Ok(cropped)
    }

    /// Serialize `doc` to `path` via a temp file in the same directory, so
    /// a failure mid-write never leaves a partial file under the final name.
    pub fn save_atomic(doc: &mut Document, path: &Path) -> Result<()> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new("."))).map_err(|source| {
            CropError::WriteFailure {
                path: path.to_path_buf(),
                source,
            }
        })?;

        doc.save_to(&mut tmp)
            .map_err(|e| CropError::WriteFailure {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?;
        tmp.flush().map_err(|source| CropError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;

        tmp.persist(path).map_err(|e| CropError::WriteFailure {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        Ok(())
    }

    /// Metadata from the document info dictionary
    pub fn info(&self) -> PdfInfo {
        let mut info = PdfInfo {
            page_count: self.page_count(),
            ..PdfInfo::default()
        };

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = get_string_from_dict(dict, b"Title");
                info.author = get_string_from_dict(dict, b"Author");
                info.creation_date = get_string_from_dict(dict, b"CreationDate");
            }
        }

        info
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creation_date: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    // UTF-16 BE with BOM, otherwise treat as Latin-1 / PDFDocEncoding
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16(&u16_chars).ok()
    } else {
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testutil::{page_heights, sample_document, sample_pdf_bytes};

    fn open_sample(dir: &Path, pages: u32) -> PdfDocument {
        let path = dir.join("sample.pdf");
        std::fs::write(&path, sample_pdf_bytes(pages)).unwrap();
        PdfDocument::open(&path).unwrap()
    }

    #[test]
    fn test_open_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        assert!(matches!(
            PdfDocument::open(&path),
            Err(CropError::UnreadableSource { .. })
        ));
    }

    #[test]
    fn test_page_count() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(open_sample(dir.path(), 5).page_count(), 5);
    }

    #[test]
    fn test_select_keeps_requested_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_sample(dir.path(), 5);

        let cropped = doc.select_pages(&[0, 2, 4]).unwrap();

        // Sample pages carry distinct MediaBox heights, so the surviving
        // pages identify themselves
        assert_eq!(page_heights(&cropped), page_heights_of(&doc.doc, &[0, 2, 4]));
        assert_eq!(cropped.get_pages().len(), 3);
    }

    fn page_heights_of(doc: &Document, indices: &[u32]) -> Vec<i64> {
        let all = page_heights(doc);
        indices.iter().map(|&i| all[i as usize]).collect()
    }

    #[test]
    fn test_select_single_page() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_sample(dir.path(), 3);

        let cropped = doc.select_pages(&[1]).unwrap();
        assert_eq!(page_heights(&cropped), page_heights_of(&doc.doc, &[1]));
    }

    #[test]
    fn test_select_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        std::fs::write(&path, sample_pdf_bytes(0)).unwrap();
        let doc = PdfDocument::open(&path).unwrap();

        assert!(matches!(
            doc.select_pages(&[0]),
            Err(CropError::EmptySource { .. })
        ));
    }

    #[test]
    fn test_select_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_sample(dir.path(), 3);

        assert!(matches!(
            doc.select_pages(&[]),
            Err(CropError::EmptySelection { .. })
        ));
    }

    #[test]
    fn test_select_skips_stale_indices() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_sample(dir.path(), 3);

        // 7 is past the end: skipped, the valid index still survives
        let cropped = doc.select_pages(&[1, 7]).unwrap();
        assert_eq!(page_heights(&cropped), page_heights_of(&doc.doc, &[1]));
    }

    #[test]
    fn test_select_only_stale_indices() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_sample(dir.path(), 3);

        assert!(matches!(
            doc.select_pages(&[5, 6]),
            Err(CropError::EmptySelection { .. })
        ));
    }

    #[test]
    fn test_save_atomic_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = sample_document(2);
        let path = dir.path().join("out.pdf");

        PdfDocument::save_atomic(&mut doc, &path).unwrap();

        let reloaded = Document::load(&path).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
        // No temp file left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = sample_document(1);
        let path = dir.path().join("no_such_dir").join("out.pdf");

        assert!(matches!(
            PdfDocument::save_atomic(&mut doc, &path),
            Err(CropError::WriteFailure { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_info_page_count() {
        let dir = tempfile::tempdir().unwrap();
        let doc = open_sample(dir.path(), 4);
        assert_eq!(doc.info().page_count, 4);
    }

    #[test]
    fn test_decode_utf16_string() {
        // "Hi" as UTF-16 BE with BOM
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_pdf_string(&bytes), Some("Hi".to_string()));
    }
}
