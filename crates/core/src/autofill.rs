//! Applies filename classifications to upload-stage entries, at most once per entry.

use crate::classifier::FilenameClassifier;
use crate::form::{self, ChangeEvent, Field, FileEntry, FormControl};
use crate::models::{ClassificationResult, EntryId};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    Written,
    ControlMissing,
    OptionMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWrite {
    pub field: Field,
    /// Text written, or option label looked up.
    pub wanted: String,
    /// Value actually stored in the control.
    pub value: Option<String>,
    pub status: WriteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntryOutcome {
    AlreadyProcessed {
        id: EntryId,
    },
    MissingFilename {
        id: EntryId,
    },
    Filled {
        id: EntryId,
        filename: String,
        result: ClassificationResult,
        writes: Vec<FieldWrite>,
    },
}

impl EntryOutcome {
    pub fn id(&self) -> &EntryId {
        match self {
            EntryOutcome::AlreadyProcessed { id }
            | EntryOutcome::MissingFilename { id }
            | EntryOutcome::Filled { id, .. } => id,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, EntryOutcome::Filled { .. })
    }
}

#[derive(Debug, Default)]
pub struct EntryAutofiller {
    classifier: FilenameClassifier,
    processed: HashSet<EntryId>,
}

impl EntryAutofiller {
    pub fn new(classifier: FilenameClassifier) -> Self {
        Self {
            classifier,
            processed: HashSet::new(),
        }
    }

    pub fn classifier(&self) -> &FilenameClassifier {
        &self.classifier
    }

    pub fn is_processed(&self, id: &EntryId) -> bool {
        self.processed.contains(id)
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn fill_all<'a, I>(&mut self, entries: I) -> Vec<EntryOutcome>
    where
        I: IntoIterator<Item = &'a mut dyn FileEntry>,
    {
        entries
            .into_iter()
            .map(|entry| self.fill_entry(entry))
            .collect()
    }

    pub fn fill_entry(&mut self, entry: &mut dyn FileEntry) -> EntryOutcome {
        let id = entry.id();
        if self.processed.contains(&id) {
            return EntryOutcome::AlreadyProcessed { id };
        }

        let Some(raw) = entry.filename() else {
            warn!("entry {}: missing filename element, skipped", id);
            return EntryOutcome::MissingFilename { id };
        };
        let raw = raw.trim().to_string();
        let result = self.classifier.classify(&raw);
        info!("autofill {} -> {:?}", id, result.canonical_label);

        let visibility = self
            .classifier
            .visibility_label(result.visibility_tier)
            .to_string();
        let language = self.classifier.language_label(result.language).to_string();

        let writes = vec![
            write_text(entry, Field::Description, &result.canonical_label),
            write_select(entry, Field::Visibility, &visibility),
            write_select(entry, Field::Language, &language),
        ];

        self.processed.insert(id.clone());
        EntryOutcome::Filled {
            id,
            filename: raw,
            result,
            writes,
        }
    }
}

fn missing(field: Field, wanted: &str) -> FieldWrite {
    FieldWrite {
        field,
        wanted: wanted.to_string(),
        value: None,
        status: WriteStatus::ControlMissing,
    }
}

fn write_text(entry: &mut dyn FileEntry, field: Field, text: &str) -> FieldWrite {
    let id = entry.id();
    let Some(control) = entry.control(field) else {
        warn!("entry {}: {} input not found", id, field);
        return missing(field, text);
    };
    control.set_value(text);
    control.notify(ChangeEvent::Input);
    control.notify(ChangeEvent::Change);
    info!("  set {} {} = {:?}", field, control.name(), text);
    FieldWrite {
        field,
        wanted: text.to_string(),
        value: Some(text.to_string()),
        status: WriteStatus::Written,
    }
}

fn write_select(entry: &mut dyn FileEntry, field: Field, label: &str) -> FieldWrite {
    let id = entry.id();
    let Some(control) = entry.control(field) else {
        warn!("entry {}: {} select not found", id, field);
        return missing(field, label);
    };
    select_by_label(control, field, label)
}

fn select_by_label(control: &mut dyn FormControl, field: Field, label: &str) -> FieldWrite {
    let options = control.options();
    let Some(option) = form::find_option(&options, label) else {
        warn!("  {} option not found: {:?} in {}", field, label, control.name());
        return FieldWrite {
            field,
            wanted: label.to_string(),
            value: None,
            status: WriteStatus::OptionMissing,
        };
    };
    control.set_value(&option.value);
    control.notify(ChangeEvent::Change);
    info!("  set {}: {} value: {}", field, label, option.value);
    FieldWrite {
        field,
        wanted: label.to_string(),
        value: Some(option.value.clone()),
        status: WriteStatus::Written,
    }
}
