use crate::autofill::{EntryAutofiller, EntryOutcome};
use crate::classifier::FilenameClassifier;
use crate::config::{AppConfig, TimingConfig};
use crate::debounce::Debouncer;
use crate::page::{HostPage, PageMode, Stage};
use crate::suggester::{Panel, PanelSink, SubjectSuggester};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Structural change reported by the host page's observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// New file entries were inserted.
    EntriesAdded(usize),
    Other,
}

#[derive(Debug)]
pub enum StartOutcome {
    Skipped(PageMode),
    Files(Vec<EntryOutcome>),
    Subjects(Option<Panel>),
}

/// One page visit. Holds the only state that outlives a single run: the set
/// of entries already filled.
#[derive(Debug)]
pub struct Autofill {
    filler: EntryAutofiller,
    suggester: SubjectSuggester,
    timing: TimingConfig,
}

impl Default for Autofill {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Autofill {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            filler: EntryAutofiller::new(FilenameClassifier::from_config(&cfg.classifier)),
            suggester: SubjectSuggester::new(&cfg.suggester),
            timing: cfg.timing.clone(),
        }
    }

    pub fn filler(&self) -> &EntryAutofiller {
        &self.filler
    }

    pub fn suggester(&self) -> &SubjectSuggester {
        &self.suggester
    }

    /// Fills every entry on the page that has not been filled yet.
    pub fn run_file_classification_now(&mut self, page: &mut dyn HostPage) -> Vec<EntryOutcome> {
        let entries = page.file_entries();
        if entries.is_empty() {
            info!("no file entries found yet");
            return Vec::new();
        }
        info!("processing {} file entries", entries.len());
        let outcomes = self.filler.fill_all(entries);
        let filled = outcomes.iter().filter(|o| o.is_filled()).count();
        info!("filled {} of {} entries", filled, outcomes.len());
        outcomes
    }

    /// Builds a fresh suggestion panel and hands it to `sink`. Returns `None`
    /// without touching the sink when the title or subject tree is missing.
    pub fn run_subject_suggestion_now(
        &self,
        page: &dyn HostPage,
        sink: &mut dyn PanelSink,
    ) -> Option<Panel> {
        let Some(title) = page.title() else {
            warn!("title element not found, subject suggestion aborted");
            return None;
        };
        let Some(nodes) = page.subject_nodes() else {
            warn!("subject tree not found, subject suggestion aborted");
            return None;
        };
        info!("scoring {} subjects", nodes.len());
        let panel = self.suggester.suggest(&title, &nodes);
        sink.replace(panel.clone());
        Some(panel)
    }

    /// Stage arrival: checks the page mode, waits for the host's first render,
    /// then runs the stage's pipeline once.
    pub async fn start(&mut self, page: &mut dyn HostPage, sink: &mut dyn PanelSink) -> StartOutcome {
        let mode = page.mode();
        info!("page mode {:?} at {}", mode, page.location());
        let Some(stage) = mode.stage() else {
            return StartOutcome::Skipped(mode);
        };
        tokio::time::sleep(self.timing.startup_delay()).await;
        match stage {
            Stage::Files => StartOutcome::Files(self.run_file_classification_now(page)),
            Stage::Subjects => StartOutcome::Subjects(self.run_subject_suggestion_now(page, sink)),
        }
    }

    /// Waits for the next debounced burst of added entries, then refreshes the
    /// page and fills whatever is new. Changes that add no entries are ignored
    /// and do not delay a pending pass. `None` once `changes` is closed.
    pub async fn next_rescan(
        &mut self,
        page: &mut dyn HostPage,
        changes: &mut mpsc::Receiver<PageChange>,
    ) -> Option<Vec<EntryOutcome>> {
        let debouncer = Debouncer::new(self.timing.debounce());
        loop {
            let batch = debouncer
                .next_batch_filtered(changes, |c| matches!(c, PageChange::EntriesAdded(_)))
                .await?;
            let added: usize = batch
                .iter()
                .map(|c| match c {
                    PageChange::EntriesAdded(n) => *n,
                    PageChange::Other => 0,
                })
                .sum();
            info!("{} new document entries detected, running autofill", added);
            if let Err(e) = page.refresh() {
                warn!("could not refresh page before re-scan: {}", e);
                continue;
            }
            return Some(self.run_file_classification_now(page));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;
    use crate::models::SubjectNode;
    use crate::testing::{FakeEntry, FakePage, RecordingSink};
    use std::time::Duration;

    const FILES_URL: &str = "https://repo.example/cgi/users/home?screen=EPrint::Edit&stage=files";
    const SUBJECTS_URL: &str =
        "https://repo.example/cgi/users/home?screen=EPrint::Edit&stage=subjects";

    fn files_page(entries: Vec<FakeEntry>) -> FakePage {
        FakePage {
            url: FILES_URL.to_string(),
            entries,
            ..FakePage::default()
        }
    }

    #[test]
    fn manual_file_run_is_idempotent() {
        let mut autofill = Autofill::default();
        let mut page = files_page(vec![
            FakeEntry::new("a", "1. Cover.pdf"),
            FakeEntry::new("b", "2. Bab I Pendahuluan.pdf"),
        ]);

        let first = autofill.run_file_classification_now(&mut page);
        assert!(first.iter().all(|o| o.is_filled()));
        assert_eq!(page.entries[1].value(Field::Description), Some("BAB 1"));
        let events = page.entries.iter().map(|e| e.event_count()).sum::<usize>();

        let second = autofill.run_file_classification_now(&mut page);
        assert!(second.iter().all(|o| !o.is_filled()));
        assert_eq!(
            page.entries.iter().map(|e| e.event_count()).sum::<usize>(),
            events
        );
    }

    #[test]
    fn empty_upload_list_is_fine() {
        let mut autofill = Autofill::default();
        let mut page = files_page(Vec::new());
        assert!(autofill.run_file_classification_now(&mut page).is_empty());
    }

    #[test]
    fn suggestion_replaces_panel_each_run() {
        let autofill = Autofill::default();
        let page = FakePage {
            url: SUBJECTS_URL.to_string(),
            title: Some("Edit item: Pengaruh CAR dan LDR Terhadap Profitabilitas".into()),
            subjects: Some(vec![
                SubjectNode::new("HG Finance"),
                SubjectNode::new("Profitabilitas dan Rasio CAR"),
            ]),
            ..FakePage::default()
        };
        let mut sink = RecordingSink::default();

        let panel = autofill.run_subject_suggestion_now(&page, &mut sink).unwrap();
        autofill.run_subject_suggestion_now(&page, &mut sink).unwrap();
        assert_eq!(sink.replaced, 2);
        assert_eq!(sink.current.as_ref(), Some(&panel));
        assert!(!panel.is_empty());
    }

    #[test]
    fn missing_title_or_tree_aborts_suggestion() {
        let autofill = Autofill::default();
        let mut sink = RecordingSink::default();
        let no_title = FakePage {
            subjects: Some(vec![SubjectNode::new("Bank")]),
            ..FakePage::default()
        };
        assert!(autofill.run_subject_suggestion_now(&no_title, &mut sink).is_none());
        let no_tree = FakePage {
            title: Some("Bank".into()),
            ..FakePage::default()
        };
        assert!(autofill.run_subject_suggestion_now(&no_tree, &mut sink).is_none());
        assert_eq!(sink.replaced, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn start_waits_then_dispatches_by_stage() {
        let mut autofill = Autofill::default();
        let mut sink = RecordingSink::default();

        let mut page = files_page(vec![FakeEntry::new("a", "Abstract.pdf")]);
        let begin = tokio::time::Instant::now();
        let outcome = autofill.start(&mut page, &mut sink).await;
        assert!(begin.elapsed() >= Duration::from_millis(400));
        assert!(matches!(outcome, StartOutcome::Files(ref o) if o.len() == 1));
        assert_eq!(page.entries[0].value(Field::Description), Some("ABSTRAK"));

        let mut other = FakePage {
            url: "https://repo.example/cgi/users/home?screen=Items".into(),
            ..FakePage::default()
        };
        assert!(matches!(
            autofill.start(&mut other, &mut sink).await,
            StartOutcome::Skipped(PageMode::Other)
        ));

        let mut subjects = FakePage {
            url: SUBJECTS_URL.to_string(),
            title: Some("Bank Syariah".into()),
            subjects: Some(vec![SubjectNode::new("Perbankan Syariah")]),
            ..FakePage::default()
        };
        assert!(matches!(
            autofill.start(&mut subjects, &mut sink).await,
            StartOutcome::Subjects(Some(_))
        ));
        assert_eq!(sink.replaced, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rescan_fills_only_new_entries_after_quiet_period() {
        let mut autofill = Autofill::default();
        let mut page = files_page(vec![FakeEntry::new("a", "Cover.pdf")]);
        autofill.run_file_classification_now(&mut page);
        page.pending = vec![
            FakeEntry::new("b", "Bab 2.pdf"),
            FakeEntry::new("c", "Lampiran.pdf"),
        ];

        let (tx, mut rx) = mpsc::channel(8);
        tx.send(PageChange::Other).await.unwrap();
        tx.send(PageChange::EntriesAdded(1)).await.unwrap();
        tx.send(PageChange::EntriesAdded(1)).await.unwrap();

        let outcomes = autofill.next_rescan(&mut page, &mut rx).await.unwrap();
        assert_eq!(page.refreshes, 1);
        assert_eq!(outcomes.len(), 3);
        assert!(!outcomes[0].is_filled());
        assert!(outcomes[1].is_filled() && outcomes[2].is_filled());
        assert_eq!(page.entries[2].value(Field::Description), Some("LAMPIRAN"));

        drop(tx);
        assert!(autofill.next_rescan(&mut page, &mut rx).await.is_none());
    }
}
