//! Host-surface traits for the upload stage. The host page implements these;
//! the autofill logic only ever talks to the page through them.

use crate::models::EntryId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Description,
    Visibility,
    Language,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Description => "description",
            Field::Visibility => "visibility",
            Field::Language => "language",
        };
        f.write_str(s)
    }
}

/// Notification fired after a programmatic write so host listeners react as
/// if the user had edited the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEvent {
    Input,
    Change,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub trait FormControl {
    /// Identifier used in log lines.
    fn name(&self) -> String;

    /// Options of a single-select control; empty for text inputs.
    fn options(&self) -> Vec<SelectOption>;

    fn set_value(&mut self, value: &str);

    fn notify(&mut self, event: ChangeEvent);
}

pub trait FileEntry {
    fn id(&self) -> EntryId;

    /// Display filename, `None` when the entry has no filename element.
    fn filename(&self) -> Option<String>;

    fn control(&mut self, field: Field) -> Option<&mut dyn FormControl>;
}

/// Finds the option whose trimmed display text equals `label`, ignoring case.
pub fn find_option<'a>(options: &'a [SelectOption], label: &str) -> Option<&'a SelectOption> {
    let wanted = label.trim().to_lowercase();
    options
        .iter()
        .find(|opt| opt.label.trim().to_lowercase() == wanted)
}
