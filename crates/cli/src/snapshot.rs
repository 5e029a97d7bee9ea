//! JSON page snapshots: a saved copy of the deposit editor that stands in for
//! the live page.

use anyhow::Context;
use autofill_core::form::{ChangeEvent, Field, FileEntry, FormControl, SelectOption};
use autofill_core::models::{EntryId, SubjectNode};
use autofill_core::page::HostPage;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlSnapshot {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Notifications fired at this control, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<ChangeEvent>,
}

impl FormControl for ControlSnapshot {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn options(&self) -> Vec<SelectOption> {
        self.options.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn notify(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub description: Option<ControlSnapshot>,
    #[serde(default)]
    pub visibility: Option<ControlSnapshot>,
    #[serde(default)]
    pub language: Option<ControlSnapshot>,
}

impl FileEntry for EntrySnapshot {
    fn id(&self) -> EntryId {
        EntryId::new(self.id.clone())
    }

    fn filename(&self) -> Option<String> {
        self.filename.clone()
    }

    fn control(&mut self, field: Field) -> Option<&mut dyn FormControl> {
        let slot = match field {
            Field::Description => self.description.as_mut(),
            Field::Visibility => self.visibility.as_mut(),
            Field::Language => self.language.as_mut(),
        };
        slot.map(|c| c as &mut dyn FormControl)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Vec<EntrySnapshot>,
    /// `None` when the page has no subject tree.
    #[serde(default)]
    pub subjects: Option<Vec<SubjectNode>>,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_entries(mut self, entries: Vec<EntrySnapshot>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_subjects(mut self, subjects: Vec<SubjectNode>) -> Self {
        self.subjects = Some(subjects);
        self
    }

    pub fn parse(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read page snapshot {:?}", path))?;
        let mut page = Self::parse(&content)
            .with_context(|| format!("parse page snapshot {:?}", path))?;
        page.source = Some(path.to_path_buf());
        Ok(page)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("write page snapshot {:?}", path))?;
        Ok(())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn entry_ids(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn entry(&self, id: &str) -> Option<&EntrySnapshot> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl HostPage for PageSnapshot {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn file_entries(&mut self) -> Vec<&mut dyn FileEntry> {
        self.entries
            .iter_mut()
            .map(|e| e as &mut dyn FileEntry)
            .collect()
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn subject_nodes(&self) -> Option<Vec<SubjectNode>> {
        self.subjects.clone()
    }

    /// Re-reads the snapshot from disk; the file is the page's current state.
    fn refresh(&mut self) -> anyhow::Result<()> {
        if let Some(path) = self.source.clone() {
            *self = Self::load(&path)?;
        }
        Ok(())
    }
}
