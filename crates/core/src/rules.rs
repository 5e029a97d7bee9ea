//! Canonical-label rules: an ordered decision list, first match wins.

use crate::chapter;
use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Case-insensitive substring test against any of the needles.
    Contains { any: Vec<String> },
    /// Case-insensitive standalone word.
    Word { word: String },
    /// A chapter number can be read from the description.
    Chapter,
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Label {
    Fixed {
        text: String,
    },
    /// `"{prefix} {n}"`; only valid together with [`Condition::Chapter`].
    Chapter {
        #[serde(default = "default_chapter_prefix")]
        prefix: String,
    },
    /// The description itself, upper-cased.
    Upper,
}

fn default_chapter_prefix() -> String {
    "BAB".to_string()
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelRule {
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub condition: Condition,
    pub label: Label,
}

enum Hit {
    Plain,
    Chapter(u32),
}

fn contains_word(description: &str, word: &str) -> bool {
    description
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .any(|w| !w.is_empty() && w.eq_ignore_ascii_case(word))
}

fn matches(condition: &Condition, description: &str, lower: &str) -> Option<Hit> {
    let hit = match condition {
        Condition::Contains { any } => any
            .iter()
            .any(|needle| lower.contains(&needle.to_lowercase())),
        Condition::Word { word } => contains_word(description, word),
        Condition::Chapter => return chapter::detect_chapter(description).map(Hit::Chapter),
        Condition::Always => true,
    };
    hit.then_some(Hit::Plain)
}

impl LabelRule {
    pub fn new(name: &str, condition: Condition, label: Label) -> Self {
        Self {
            name: name.to_string(),
            priority: 0,
            enabled: true,
            condition,
            label,
        }
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        if matches!(self.label, Label::Chapter { .. }) && self.condition != Condition::Chapter {
            return Err(RuleError::ChapterLabelWithoutChapter(self.name.clone()));
        }
        Ok(())
    }

    /// The label this rule produces for `description`, if it fires.
    pub fn apply(&self, description: &str) -> Option<String> {
        let hit = matches(&self.condition, description, &description.to_lowercase())?;
        match (&self.label, hit) {
            (Label::Fixed { text }, _) => Some(text.clone()),
            (Label::Chapter { prefix }, Hit::Chapter(n)) => Some(format!("{} {}", prefix, n)),
            (Label::Chapter { .. }, Hit::Plain) => None,
            (Label::Upper, _) => Some(description.to_uppercase()),
        }
    }
}

fn contains(name: &str, needles: &[&str], text: &str) -> LabelRule {
    LabelRule::new(
        name,
        Condition::Contains {
            any: needles.iter().map(|n| n.to_string()).collect(),
        },
        Label::Fixed {
            text: text.to_string(),
        },
    )
}

/// The built-in decision list. Longer compound phrases come before the
/// shorter phrases they contain.
pub fn builtin_rules() -> Vec<LabelRule> {
    vec![
        contains("cover", &["cover", "halaman judul", "judul halaman"], "COVER"),
        contains("abstract", &["abstrak", "abstract"], "ABSTRAK"),
        contains(
            "bibliography_and_appendix",
            &["daftar pustaka dan lampiran", "daftar pustaka & lampiran"],
            "DAFTAR PUSTAKA DAN LAMPIRAN",
        ),
        contains("bibliography", &["daftar pustaka"], "DAFTAR PUSTAKA"),
        contains("appendix", &["lampiran"], "LAMPIRAN"),
        LabelRule::new(
            "chapter_number",
            Condition::Chapter,
            Label::Chapter {
                prefix: default_chapter_prefix(),
            },
        ),
        LabelRule::new(
            "chapter_unknown",
            Condition::Word {
                word: "bab".to_string(),
            },
            Label::Fixed {
                text: "BAB XXX".to_string(),
            },
        ),
        LabelRule::new("verbatim", Condition::Always, Label::Upper),
    ]
}

#[derive(Debug, Clone)]
pub struct LabelRules {
    rules: Vec<LabelRule>,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }
}

impl LabelRules {
    /// Enabled custom rules, ordered by priority, followed by the built-ins.
    pub fn with_custom(custom: Vec<LabelRule>) -> Self {
        let mut rules: Vec<LabelRule> = custom
            .into_iter()
            .filter(|r| r.enabled)
            .filter(|r| match r.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("dropping label rule: {}", e);
                    false
                }
            })
            .collect();
        rules.sort_by_key(|r| r.priority);
        rules.extend(builtin_rules());
        Self { rules }
    }

    pub fn rules(&self) -> &[LabelRule] {
        &self.rules
    }

    /// Returns the canonical label and the name of the rule that produced it.
    pub fn resolve(&self, description: &str) -> (String, &str) {
        for rule in &self.rules {
            if let Some(label) = rule.apply(description) {
                debug!("rule {} matched {:?}", rule.name, description);
                return (label, rule.name.as_str());
            }
        }
        (description.to_uppercase(), "verbatim")
    }

    pub fn canonicalize(&self, description: &str) -> String {
        self.resolve(description).0
    }
}

pub fn load_rule_file(path: &Path) -> Result<LabelRule, RuleError> {
    let content = fs::read_to_string(path).map_err(|source| RuleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rule: LabelRule = toml::from_str(&content).map_err(|source| RuleError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    rule.validate()?;
    Ok(rule)
}

pub fn load_rules_from_dir(dir: &Path) -> anyhow::Result<Vec<LabelRule>> {
    let mut rules = Vec::new();
    if !dir.exists() {
        return Ok(rules);
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("toml")
        {
            paths.push(entry.path());
        }
    }
    paths.sort();
    for path in paths {
        match load_rule_file(&path) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!("skipping rule file: {}", e),
        }
    }
    Ok(rules)
}
