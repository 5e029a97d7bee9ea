//! In-memory host page used by unit tests.

use crate::form::{ChangeEvent, Field, FileEntry, FormControl, SelectOption};
use crate::models::{EntryId, SubjectNode};
use crate::page::HostPage;
use crate::suggester::{Panel, PanelSink};

#[derive(Debug, Default, Clone)]
pub struct FakeControl {
    pub name: String,
    pub options: Vec<SelectOption>,
    pub value: Option<String>,
    pub events: Vec<ChangeEvent>,
}

impl FormControl for FakeControl {
    fn name(&self) -> String {
        self.name.clone()
    }
    fn options(&self) -> Vec<SelectOption> {
        self.options.clone()
    }
    fn set_value(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }
    fn notify(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Clone)]
pub struct FakeEntry {
    pub id: String,
    pub filename: Option<String>,
    pub description: Option<FakeControl>,
    pub visibility: Option<FakeControl>,
    pub language: Option<FakeControl>,
}

impl FakeEntry {
    pub fn new(id: &str, filename: &str) -> Self {
        Self {
            id: id.to_string(),
            filename: Some(filename.to_string()),
            description: Some(FakeControl {
                name: format!("{id}_formatdesc"),
                ..FakeControl::default()
            }),
            visibility: Some(FakeControl {
                name: format!("{id}_security"),
                options: options(&[("public", "Anyone"), ("validuser", "Registered users only")]),
                ..FakeControl::default()
            }),
            language: Some(FakeControl {
                name: format!("{id}_language"),
                options: options(&[("en", "English"), ("id", "Indonesian")]),
                ..FakeControl::default()
            }),
        }
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Description => self.description.as_ref(),
            Field::Visibility => self.visibility.as_ref(),
            Field::Language => self.language.as_ref(),
        };
        slot.and_then(|c| c.value.as_deref())
    }

    pub fn event_count(&self) -> usize {
        [&self.description, &self.visibility, &self.language]
            .iter()
            .filter_map(|c| c.as_ref())
            .map(|c| c.events.len())
            .sum()
    }
}

impl FileEntry for FakeEntry {
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

pub fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(v, l)| SelectOption {
            value: v.to_string(),
            label: l.to_string(),
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct FakePage {
    pub url: String,
    pub title: Option<String>,
    pub entries: Vec<FakeEntry>,
    pub subjects: Option<Vec<SubjectNode>>,
    /// Entries that show up on the next refresh.
    pub pending: Vec<FakeEntry>,
    pub refreshes: usize,
}

impl HostPage for FakePage {
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
    fn refresh(&mut self) -> anyhow::Result<()> {
        self.refreshes += 1;
        self.entries.append(&mut self.pending);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub current: Option<Panel>,
    pub replaced: usize,
}

impl PanelSink for RecordingSink {
    fn replace(&mut self, panel: Panel) {
        self.replaced += 1;
        self.current = Some(panel);
    }
}
