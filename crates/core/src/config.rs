use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub suggester: SuggesterConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Option text selected for cover and abstract documents.
    pub anyone_label: String,
    /// Option text selected for every other document.
    pub registered_label: String,
    pub language_label: String,
    /// Directory of extra label rules (`*.toml`), evaluated before the built-ins.
    pub rules_path: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            anyone_label: "Anyone".to_string(),
            registered_label: "Registered users only".to_string(),
            language_label: "Indonesian".to_string(),
            rules_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggesterConfig {
    /// Title tokens must be longer than this.
    pub min_signal_len: usize,
    /// Taxonomy label tokens must be longer than this.
    pub min_label_token_len: usize,
    pub primary_limit: usize,
    pub max_results: usize,
    pub title_prefixes: Vec<String>,
    pub extra_stop_words: Vec<String>,
    pub extra_acronyms: Vec<String>,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            min_signal_len: 3,
            min_label_token_len: 2,
            primary_limit: 5,
            max_results: 15,
            title_prefixes: vec!["Edit item:".to_string()],
            extra_stop_words: Vec::new(),
            extra_acronyms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub startup_delay_ms: u64,
    pub debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: 400,
            debounce_ms: 300,
        }
    }
}

impl TimingConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_default_file_gives_defaults() {
        let cfg = load(None).unwrap();
        assert_eq!(cfg.timing.debounce_ms, 300);
        assert_eq!(cfg.suggester.min_signal_len, 3);
        assert_eq!(cfg.classifier.language_label, "Indonesian");
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofill.toml");
        std::fs::write(
            &path,
            "[timing]\ndebounce_ms = 50\n\n[suggester]\nextra_acronyms = [\"EBIT\"]\n",
        )
        .unwrap();

        let cfg = load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(cfg.timing.debounce_ms, 50);
        assert_eq!(cfg.timing.startup_delay_ms, 400);
        assert_eq!(cfg.suggester.extra_acronyms, vec!["EBIT".to_string()]);
        assert_eq!(cfg.suggester.primary_limit, 5);
    }
}
