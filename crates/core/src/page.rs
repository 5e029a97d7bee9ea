//! Page-mode detection and the host-page surface both pipelines read from.

use crate::form::FileEntry;
use crate::models::SubjectNode;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Files,
    Subjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    Edit(Stage),
    Other,
}

impl PageMode {
    /// Reads `screen` and `stage` from the query string of `url`.
    pub fn from_url(url: &str) -> Self {
        let query = match url.split_once('?') {
            Some((_, q)) => q.split('#').next().unwrap_or(""),
            None => "",
        };
        let params: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
        let param = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.to_lowercase())
                .unwrap_or_default()
        };
        let screen = param("screen");
        let stage = param("stage");
        debug!("page screen={:?} stage={:?}", screen, stage);

        if !screen.contains("eprint::edit") {
            return PageMode::Other;
        }
        if stage.contains("files") {
            PageMode::Edit(Stage::Files)
        } else if stage.contains("subject") {
            PageMode::Edit(Stage::Subjects)
        } else {
            PageMode::Other
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            PageMode::Edit(stage) => Some(*stage),
            PageMode::Other => None,
        }
    }
}

/// The deposit editor as seen by the pipelines.
pub trait HostPage {
    fn location(&self) -> String;

    fn file_entries(&mut self) -> Vec<&mut dyn FileEntry>;

    /// Text of the page title element, `None` if it is absent.
    fn title(&self) -> Option<String>;

    /// Nodes of the subject tree, `None` if the tree container is absent.
    fn subject_nodes(&self) -> Option<Vec<SubjectNode>>;

    /// Re-reads host state before a re-scan. Live pages need nothing here.
    fn refresh(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn mode(&self) -> PageMode {
        PageMode::from_url(&self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://repository.example.ac.id/cgi/users/home";

    #[test]
    fn files_stage() {
        let url = format!("{BASE}?eprintid=42&screen=EPrint%3A%3AEdit&stage=files#t");
        assert_eq!(PageMode::from_url(&url), PageMode::Edit(Stage::Files));
    }

    #[test]
    fn subjects_stage() {
        let url = format!("{BASE}?screen=EPrint::Edit&eprintid=42&stage=subjects");
        assert_eq!(PageMode::from_url(&url), PageMode::Edit(Stage::Subjects));
    }

    #[test]
    fn other_screens_and_stages() {
        for url in [
            format!("{BASE}?screen=EPrint::View&stage=files"),
            format!("{BASE}?screen=EPrint::Edit&stage=core"),
            format!("{BASE}?screen=EPrint::Edit"),
            BASE.to_string(),
        ] {
            assert_eq!(PageMode::from_url(&url), PageMode::Other, "{url}");
        }
    }
}
