use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("cannot read rule file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid rule file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("rule {0:?} pairs a chapter label with a condition that yields no chapter number")]
    ChapterLabelWithoutChapter(String),
}
