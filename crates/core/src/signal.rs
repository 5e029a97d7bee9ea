//! Signal-keyword extraction from item titles.

use crate::config::SuggesterConfig;
use crate::models::SignalKeywords;
use crate::stopwords;
use crate::text;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug)]
enum AcronymMatcher {
    Pattern(Regex),
    // Used when the pattern cannot be compiled.
    Substring,
}

#[derive(Debug)]
struct Acronym {
    text: String,
    matcher: AcronymMatcher,
}

impl Acronym {
    fn compile(text: String) -> Self {
        // Whole word, or glued onto exactly one leading letter ("XCAR").
        let pattern = format!(r"\b[A-Z]?{}\b", regex::escape(&text));
        Self::with_pattern(text, &pattern)
    }

    fn with_pattern(text: String, pattern: &str) -> Self {
        let matcher = match Regex::new(pattern) {
            Ok(re) => AcronymMatcher::Pattern(re),
            Err(e) => {
                warn!("acronym pattern for {:?} rejected ({}); using substring test", text, e);
                AcronymMatcher::Substring
            }
        };
        Self { text, matcher }
    }

    fn is_match(&self, upper_title: &str) -> bool {
        match &self.matcher {
            AcronymMatcher::Pattern(re) => re.is_match(upper_title),
            AcronymMatcher::Substring => upper_title.contains(&self.text),
        }
    }
}

#[derive(Debug)]
pub struct SignalExtractor {
    acronyms: Vec<Acronym>,
    stop_words: HashSet<String>,
    min_len: usize,
    title_prefixes: Vec<String>,
}

impl SignalExtractor {
    pub fn new(cfg: &SuggesterConfig) -> Self {
        Self {
            acronyms: stopwords::acronym_list(&cfg.extra_acronyms)
                .into_iter()
                .map(Acronym::compile)
                .collect(),
            stop_words: stopwords::stop_word_set(&cfg.extra_stop_words),
            min_len: cfg.min_signal_len,
            title_prefixes: cfg.title_prefixes.clone(),
        }
    }

    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// Removes an editorial prefix such as "Edit item:" from a page title.
    pub fn strip_title_prefix<'a>(&self, title: &'a str) -> &'a str {
        let trimmed = title.trim();
        for prefix in &self.title_prefixes {
            let head = trimmed.get(..prefix.len());
            if head.is_some_and(|h| h.eq_ignore_ascii_case(prefix)) {
                return trimmed[prefix.len()..].trim();
            }
        }
        trimmed
    }

    pub fn extract(&self, title: &str) -> SignalKeywords {
        let upper = title.to_uppercase();
        let mut keywords = SignalKeywords::new();

        for acronym in &self.acronyms {
            if acronym.is_match(&upper) {
                debug!("acronym hit: {}", acronym.text);
                keywords.insert(acronym.text.clone());
            }
        }

        let cleaned = text::collapse_whitespace(&text::punctuation_to_spaces(&upper));
        for token in cleaned.split(' ') {
            if text::char_len(token) > self.min_len
                && !text::is_numeric(token)
                && !self.stop_words.contains(token)
            {
                keywords.insert(token.to_string());
            }
        }
        keywords
    }
}
