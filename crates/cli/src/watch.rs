use crate::report::{print_outcomes, PrintSink};
use crate::snapshot::PageSnapshot;
use anyhow::{Context, Result};
use autofill_core::config::AppConfig;
use autofill_core::page::{HostPage, Stage};
use autofill_core::pipeline::{Autofill, PageChange, StartOutcome};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Compares the snapshot on disk with the entry ids seen so far and records
/// any new ones.
pub fn detect_added(path: &Path, known: &mut HashSet<String>) -> PageChange {
    let page = match PageSnapshot::load(path) {
        Ok(p) => p,
        Err(e) => {
            debug!("snapshot not readable yet: {}", e);
            return PageChange::Other;
        }
    };
    let mut added = 0;
    for id in page.entry_ids() {
        if known.insert(id) {
            added += 1;
        }
    }
    if added > 0 {
        PageChange::EntriesAdded(added)
    } else {
        PageChange::Other
    }
}

fn touches(ev: &Event, path: &Path) -> bool {
    matches!(ev.kind, EventKind::Create(_) | EventKind::Modify(_))
        && ev.paths.iter().any(|p| p.file_name() == path.file_name())
}

/// Builds the notify handler that turns file events into page changes.
pub fn observer(
    path: PathBuf,
    mut known: HashSet<String>,
    tx: mpsc::Sender<PageChange>,
) -> impl FnMut(notify::Result<Event>) + Send + 'static {
    move |event| match event {
        Ok(ev) if touches(&ev, &path) => {
            let change = detect_added(&path, &mut known);
            if tx.blocking_send(change).is_err() {
                debug!("change receiver dropped");
            }
        }
        Ok(_) => {}
        Err(e) => warn!("watch error: {:?}", e),
    }
}

pub async fn watch_snapshot(cfg: AppConfig, path: PathBuf, write: bool, json: bool) -> Result<()> {
    let mut page = PageSnapshot::load(&path)?;
    let mut autofill = Autofill::new(&cfg);
    let mut sink = PrintSink::new(json);

    match autofill.start(&mut page, &mut sink).await {
        StartOutcome::Skipped(mode) => {
            println!("not a deposit edit page ({:?}), nothing to watch", mode);
            return Ok(());
        }
        StartOutcome::Files(outcomes) => {
            print_outcomes(&outcomes, json)?;
            if write {
                page.save(&path)?;
            }
        }
        StartOutcome::Subjects(_) => {}
    }
    if page.mode().stage() != Some(Stage::Files) {
        info!("only the upload stage is re-scanned, stopping");
        return Ok(());
    }

    let (tx, mut rx) = mpsc::channel(64);
    let mut watcher = RecommendedWatcher::new(
        observer(path.clone(), page.entry_ids(), tx),
        notify::Config::default().with_poll_interval(Duration::from_secs(2)),
    )?;
    // Watch the directory so editors that replace the file are still seen.
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("watch {:?}", dir))?;

    println!("Watching {:?} for new entries...", path);
    loop {
        let rescan = tokio::select! {
            r = autofill.next_rescan(&mut page, &mut rx) => r,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping watch");
                None
            }
        };
        let Some(outcomes) = rescan else { break };
        print_outcomes(&outcomes, json)?;
        if write {
            if let Err(e) = page.save(&path) {
                warn!("could not save snapshot: {}", e);
            }
        }
    }
    Ok(())
}
