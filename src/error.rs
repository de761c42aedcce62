use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CropError>;

/// Everything that can go wrong while cropping a single file.
///
/// All variants except `WriteFailure` on the output directory are per-file
/// conditions: the batch loop reports them and moves on to the next entry.
#[derive(Debug, Error)]
pub enum CropError {
    #[error("cannot open {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("invalid page range token '{token}'")]
    InvalidRangeFormat { token: String },

    #[error("page {page} is out of bounds (valid pages are 1-{page_count})")]
    PageOutOfBounds { page: u32, page_count: u32 },

    #[error("{} has no pages", path.display())]
    EmptySource { path: PathBuf },

    #[error("page selection for {} is empty", path.display())]
    EmptySelection { path: PathBuf },

    #[error("cannot write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CropError {
    pub(crate) fn invalid_token(token: &str) -> Self {
        CropError::InvalidRangeFormat {
            token: token.to_string(),
        }
    }
}
