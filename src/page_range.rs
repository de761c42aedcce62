use std::collections::BTreeSet;

use crate::error::{CropError, Result};

/// Parse a page range expression like "1-3,5,7-8" into zero-based page
/// indices, deduplicated and ascending.
///
/// The empty string, "all" (any case), and the literal full-range string
/// `1-<page_count>` are shortcuts for every page and skip tokenizing
/// entirely. All other input is split on commas into single page numbers
/// and inclusive `start-end` pairs, 1-based as the user writes them.
pub fn parse_page_indices(range_str: &str, page_count: u32) -> Result<Vec<u32>> {
    let cleaned: String = range_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty()
        || cleaned.eq_ignore_ascii_case("all")
        || cleaned == format!("1-{}", page_count)
    {
        return Ok((0..page_count).collect());
    }

    let mut indices = BTreeSet::new();

    for token in cleaned.split(',') {
        match token.split_once('-') {
            Some((start_str, end_str)) => {
                // A second dash ends up in end_str and fails the parse there
                let start: u32 = start_str
                    .parse()
                    .map_err(|_| CropError::invalid_token(token))?;
                let end: u32 = end_str
                    .parse()
                    .map_err(|_| CropError::invalid_token(token))?;

                if start > end {
                    return Err(CropError::invalid_token(token));
                }
                check_bounds(start, page_count)?;
                check_bounds(end, page_count)?;

                indices.extend(start - 1..end);
            }
            None => {
                let page: u32 = token
                    .parse()
                    .map_err(|_| CropError::invalid_token(token))?;
                check_bounds(page, page_count)?;
                indices.insert(page - 1);
            }
        }
    }

    Ok(indices.into_iter().collect())
}

fn check_bounds(page: u32, page_count: u32) -> Result<()> {
    if page == 0 || page > page_count {
        return Err(CropError::PageOutOfBounds { page, page_count });
    }
    Ok(())
}
