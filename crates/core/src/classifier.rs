use crate::config::ClassifierConfig;
use crate::filename;
use crate::models::{ClassificationResult, Language, VisibilityTier};
use crate::rules::{self, LabelRules};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct FilenameClassifier {
    rules: LabelRules,
    anyone_label: String,
    registered_label: String,
    language_label: String,
}

impl Default for FilenameClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default(), LabelRules::default())
    }
}

impl FilenameClassifier {
    pub fn new(cfg: &ClassifierConfig, rules: LabelRules) -> Self {
        Self {
            rules,
            anyone_label: cfg.anyone_label.clone(),
            registered_label: cfg.registered_label.clone(),
            language_label: cfg.language_label.clone(),
        }
    }

    /// Builds the classifier, pulling extra label rules from `rules_path` if set.
    pub fn from_config(cfg: &ClassifierConfig) -> Self {
        let custom = match &cfg.rules_path {
            Some(dir) => match rules::load_rules_from_dir(&PathBuf::from(dir)) {
                Ok(custom) => custom,
                Err(e) => {
                    warn!("could not read label rules from {}: {}", dir, e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self::new(cfg, LabelRules::with_custom(custom))
    }

    pub fn classify(&self, raw_filename: &str) -> ClassificationResult {
        let parsed = filename::parse_filename(raw_filename);
        let (canonical_label, rule) = self.rules.resolve(&parsed.description);
        let visibility_tier = visibility_for(&canonical_label);
        info!(
            "classified {:?} -> {:?} (rule {}, ordinal {:?}, {:?})",
            raw_filename, canonical_label, rule, parsed.ordinal_prefix, visibility_tier
        );
        ClassificationResult {
            canonical_label,
            visibility_tier,
            language: Language::Indonesian,
        }
    }

    /// Option display text to select for a visibility tier.
    pub fn visibility_label(&self, tier: VisibilityTier) -> &str {
        match tier {
            VisibilityTier::Anyone => &self.anyone_label,
            VisibilityTier::RegisteredOnly => &self.registered_label,
        }
    }

    pub fn language_label(&self, language: Language) -> &str {
        match language {
            Language::Indonesian => &self.language_label,
        }
    }
}

pub fn visibility_for(canonical_label: &str) -> VisibilityTier {
    match canonical_label {
        "COVER" | "ABSTRAK" => VisibilityTier::Anyone,
        _ => VisibilityTier::RegisteredOnly,
    }
}
