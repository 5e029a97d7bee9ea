//! Splits an uploaded document's display name into its ordinal prefix and description.

use crate::models::ParsedFilename;
use crate::text;
use once_cell::sync::Lazy;
use regex::Regex;

// "1. Bab 1.pdf" -> ("1", "Bab 1.pdf")
static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]+)\s*[.\-–_:]\s*(.+)$").expect("valid ordinal regex"));

pub fn parse_filename(raw: &str) -> ParsedFilename {
    let name = raw.trim();

    let (ordinal_prefix, mut working) = match ORDINAL_RE.captures(name) {
        Some(caps) => (
            caps[1].parse::<u32>().ok(),
            caps[2].trim().to_string(),
        ),
        None => (None, name.to_string()),
    };

    // "Cover/Halaman Judul" keeps only the first half.
    if let Some(idx) = working.find('/') {
        working = working[..idx].trim().to_string();
    }

    let description = text::strip_extension(&working).trim().to_string();
    ParsedFilename {
        ordinal_prefix,
        description,
    }
}
