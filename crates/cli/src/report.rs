//! Terminal output for autofill passes and suggestion panels.

use autofill_core::autofill::{EntryOutcome, WriteStatus};
use autofill_core::suggester::{Panel, PanelSink};
use tracing::warn;

/// Prints each panel it receives to stdout.
#[derive(Debug, Default)]
pub struct PrintSink {
    json: bool,
    last: Option<Panel>,
}

impl PrintSink {
    pub fn new(json: bool) -> Self {
        Self { json, last: None }
    }

    pub fn last(&self) -> Option<&Panel> {
        self.last.as_ref()
    }
}

impl PanelSink for PrintSink {
    fn replace(&mut self, panel: Panel) {
        if self.json {
            match serde_json::to_string_pretty(&panel) {
                Ok(s) => println!("{}", s),
                Err(e) => warn!("could not serialize panel: {}", e),
            }
        } else {
            println!("{}", panel.render_text());
        }
        self.last = Some(panel);
    }
}

pub fn outcome_line(outcome: &EntryOutcome) -> String {
    match outcome {
        EntryOutcome::AlreadyProcessed { id } => format!("{}: already filled", id),
        EntryOutcome::MissingFilename { id } => format!("{}: no filename, skipped", id),
        EntryOutcome::Filled {
            id,
            filename,
            result,
            writes,
        } => {
            let skipped: Vec<String> = writes
                .iter()
                .filter(|w| w.status != WriteStatus::Written)
                .map(|w| format!("{} ({:?})", w.field, w.status))
                .collect();
            let mut line = format!("{}: {:?} -> {}", id, filename, result.canonical_label);
            if !skipped.is_empty() {
                line.push_str(&format!("; not written: {}", skipped.join(", ")));
            }
            line
        }
    }
}

pub fn print_outcomes(outcomes: &[EntryOutcome], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcomes)?);
        return Ok(());
    }
    let filled = outcomes.iter().filter(|o| o.is_filled()).count();
    println!("filled {} of {} entries", filled, outcomes.len());
    for o in outcomes {
        println!("  {}", outcome_line(o));
    }
    Ok(())
}
