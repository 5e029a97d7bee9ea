//! Ranks subject-taxonomy nodes against the keywords of an item title.

use crate::config::SuggesterConfig;
use crate::models::{ScoredMatch, SignalKeywords, SubjectNode};
use crate::signal::SignalExtractor;
use crate::taxonomy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelBody {
    NoMatches,
    Ranked {
        primary: Vec<ScoredMatch>,
        secondary: Vec<ScoredMatch>,
    },
}

/// Read-only suggestion panel. Each run produces a new one that replaces the last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub keywords: Vec<String>,
    pub body: PanelBody,
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, PanelBody::NoMatches)
    }

    pub fn render_text(&self) -> String {
        let mut lines = vec![
            "Subject suggestions".to_string(),
            format!("Title: {}", self.title),
        ];
        if self.keywords.is_empty() {
            lines.push("Keywords: (none)".to_string());
        } else {
            lines.push(format!("Keywords: {}", self.keywords.join(", ")));
        }
        match &self.body {
            PanelBody::NoMatches => lines.push("No matching subjects found.".to_string()),
            PanelBody::Ranked { primary, secondary } => {
                for (i, m) in primary.iter().enumerate() {
                    lines.push(format!("{:>2}. {} [{}]", i + 1, m.label, m.score));
                }
                if !secondary.is_empty() {
                    lines.push("Could also match:".to_string());
                    for m in secondary {
                        lines.push(format!("    {} [{}]", m.label, m.score));
                    }
                }
            }
        }
        lines.join("\n") + "\n"
    }
}

/// Receives each freshly built panel. Implementations drop whatever they showed before.
pub trait PanelSink {
    fn replace(&mut self, panel: Panel);
}

#[derive(Debug)]
pub struct SubjectSuggester {
    extractor: SignalExtractor,
    min_label_token_len: usize,
    primary_limit: usize,
    max_results: usize,
}

impl Default for SubjectSuggester {
    fn default() -> Self {
        Self::new(&SuggesterConfig::default())
    }
}

impl SubjectSuggester {
    pub fn new(cfg: &SuggesterConfig) -> Self {
        Self {
            extractor: SignalExtractor::new(cfg),
            min_label_token_len: cfg.min_label_token_len,
            primary_limit: cfg.primary_limit,
            max_results: cfg.max_results.max(cfg.primary_limit),
        }
    }

    pub fn extractor(&self) -> &SignalExtractor {
        &self.extractor
    }

    /// Every node sharing at least one token with `keywords`, best first.
    /// Equal scores keep taxonomy order.
    pub fn rank(&self, keywords: &SignalKeywords, nodes: &[SubjectNode]) -> Vec<ScoredMatch> {
        let mut scored: Vec<ScoredMatch> = nodes
            .iter()
            .filter_map(|node| {
                let tokens = taxonomy::tokenize_label(
                    &node.label,
                    self.extractor.stop_words(),
                    self.min_label_token_len,
                );
                let score = tokens.intersection(keywords).count();
                (score > 0).then(|| ScoredMatch {
                    label: node.label.clone(),
                    score,
                })
            })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    pub fn suggest(&self, raw_title: &str, nodes: &[SubjectNode]) -> Panel {
        let title = self.extractor.strip_title_prefix(raw_title).to_string();
        let keywords = self.extractor.extract(&title);
        info!("signal keywords for {:?}: {:?}", title, keywords);

        if keywords.is_empty() {
            warn!("no signal keywords in title, nothing to match");
            return Panel {
                title,
                keywords: Vec::new(),
                body: PanelBody::NoMatches,
            };
        }

        let mut ranked = self.rank(&keywords, nodes);
        debug!("{} of {} subjects matched", ranked.len(), nodes.len());
        let keywords: Vec<String> = keywords.into_iter().collect();
        if ranked.is_empty() {
            info!("no subject shares a keyword with the title");
            return Panel {
                title,
                keywords,
                body: PanelBody::NoMatches,
            };
        }

        ranked.truncate(self.max_results);
        let secondary = ranked.split_off(ranked.len().min(self.primary_limit));
        for m in &ranked {
            info!("  suggest {} (score {})", m.label, m.score);
        }
        Panel {
            title,
            keywords,
            body: PanelBody::Ranked {
                primary: ranked,
                secondary,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(labels: &[&str]) -> Vec<SubjectNode> {
        labels.iter().map(|l| SubjectNode::new(*l)).collect()
    }

    fn kw(words: &[&str]) -> SignalKeywords {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn scores_count_distinct_shared_tokens() {
        let s = SubjectSuggester::default();
        let ranked = s.rank(
            &kw(&["BANK", "CAR", "PROFITABILITAS"]),
            &nodes(&[
                "HG Finance",
                "HG1501 Bank, Perbankan",
                "Rasio CAR Bank dan Profitabilitas",
                "Bank Bank Bank",
            ]),
        );
        assert_eq!(
            ranked,
            vec![
                ScoredMatch {
                    label: "Rasio CAR Bank dan Profitabilitas".into(),
                    score: 3
                },
                ScoredMatch {
                    label: "HG1501 Bank, Perbankan".into(),
                    score: 1
                },
                ScoredMatch {
                    label: "Bank Bank Bank".into(),
                    score: 1
                },
            ]
        );
    }

    #[test]
    fn ranking_is_repeatable() {
        let s = SubjectSuggester::default();
        let tree = nodes(&["Bank", "Perbankan Syariah", "Bank Syariah", "Ekonomi"]);
        let keywords = kw(&["BANK", "SYARIAH"]);
        assert_eq!(s.rank(&keywords, &tree), s.rank(&keywords, &tree));
    }

    #[test]
    fn primary_and_secondary_split_and_cap() {
        let s = SubjectSuggester::default();
        let labels: Vec<String> = (0..20).map(|i| format!("Manajemen Keuangan {i}")).collect();
        let tree: Vec<SubjectNode> = labels.iter().map(|l| SubjectNode::new(l.as_str())).collect();
        let panel = s.suggest("Edit item: Manajemen Keuangan Daerah", &tree);

        assert_eq!(panel.title, "Manajemen Keuangan Daerah");
        let PanelBody::Ranked { primary, secondary } = &panel.body else {
            panic!("expected ranked panel");
        };
        assert_eq!(primary.len(), 5);
        assert_eq!(secondary.len(), 10);
        assert!(primary.iter().all(|m| m.score == 2));
        assert_eq!(primary[0].label, "Manajemen Keuangan 0");
        assert_eq!(secondary[9].label, "Manajemen Keuangan 14");
    }

    #[test]
    fn few_matches_have_no_secondary_list() {
        let s = SubjectSuggester::default();
        let panel = s.suggest(
            "Pengaruh CAR dan LDR Terhadap Profitabilitas",
            &nodes(&["Ilmu Hukum", "Profitabilitas Bank", "Rasio LDR"]),
        );
        let PanelBody::Ranked { primary, secondary } = &panel.body else {
            panic!("expected ranked panel");
        };
        assert_eq!(primary.len(), 2);
        assert!(secondary.is_empty());
        assert!(panel.keywords.contains(&"CAR".to_string()));
    }

    #[test]
    fn no_keywords_gives_explicit_empty_state() {
        let s = SubjectSuggester::default();
        let panel = s.suggest("Analisis Pengaruh pada Tahun", &nodes(&["Analisis Data"]));
        assert!(panel.is_empty());
        assert!(panel.keywords.is_empty());
        assert!(panel.render_text().contains("No matching subjects found."));
    }

    #[test]
    fn no_shared_tokens_gives_explicit_empty_state() {
        let s = SubjectSuggester::default();
        let panel = s.suggest("Hukum Pidana Korupsi", &nodes(&["Akuntansi", "Perbankan"]));
        assert_eq!(panel.body, PanelBody::NoMatches);
        assert_eq!(panel.keywords, vec!["HUKUM", "KORUPSI", "PIDANA"]);
    }

    #[test]
    fn rendered_text_lists_both_tiers() {
        let panel = Panel {
            title: "T".into(),
            keywords: vec!["BANK".into()],
            body: PanelBody::Ranked {
                primary: vec![ScoredMatch {
                    label: "Bank".into(),
                    score: 1,
                }],
                secondary: vec![ScoredMatch {
                    label: "Bank Syariah".into(),
                    score: 1,
                }],
            },
        };
        let text = panel.render_text();
        assert!(text.contains(" 1. Bank [1]"));
        assert!(text.contains("Could also match:"));
        assert!(text.contains("    Bank Syariah [1]"));
    }

    #[test]
    fn rendered_empty_panel() {
        let panel = Panel {
            title: "Hukum Pidana".into(),
            keywords: Vec::new(),
            body: PanelBody::NoMatches,
        };
        assert_eq!(
            panel.render_text(),
            "Subject suggestions\nTitle: Hukum Pidana\nKeywords: (none)\nNo matching subjects found.\n"
        );
    }
}
