//! Step status ledger.
//!
//! Directory existence alone cannot tell a finished clone from one that was
//! interrupted halfway. Clone steps record their progress here so a re-run
//! can discard a half-written checkout instead of trusting it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const STATE_FILE: &str = ".deploy-state.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    NotStarted,
    InProgress,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub status: StepStatus,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Ledger {
    steps: BTreeMap<String, StepRecord>,
}

/// Ledger file stored under the build root.
pub struct StepLedger {
    path: PathBuf,
    ledger: Ledger,
}

impl StepLedger {
    /// Load the ledger in `build_root`. Missing or unreadable files start empty.
    pub fn load(build_root: &Path) -> Self {
        let path = build_root.join(STATE_FILE);
        let ledger = match read_ledger(&path) {
            Ok(ledger) => ledger,
            Err(e) => {
                println!("  Warning: ignoring unreadable {}: {e:#}", path.display());
                Ledger::default()
            }
        };
        Self { path, ledger }
    }

    pub fn status(&self, step: &str) -> StepStatus {
        self.ledger
            .steps
            .get(step)
            .map_or(StepStatus::NotStarted, |r| r.status)
    }

    /// Record `status` for `step` and write the ledger back to disk.
    pub fn mark(&mut self, step: &str, status: StepStatus) -> Result<()> {
        self.ledger.steps.insert(
            step.to_string(),
            StepRecord {
                status,
                updated: Utc::now(),
            },
        );
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.ledger)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Writing {}", self.path.display()))
    }
}

/// A missing file is an empty ledger; any other failure is reported.
fn read_ledger(path: &Path) -> Result<Ledger> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Ledger::default()),
        Err(e) => return Err(e).with_context(|| format!("Reading {}", path.display())),
    };
    serde_json::from_str(&text).with_context(|| format!("Parsing {}", path.display()))
}

/// Outcome of checking a checkout directory against the ledger.
#[derive(Debug, PartialEq, Eq)]
pub enum Checkout {
    /// Directory exists and is not known to be partial.
    Present,
    /// Nothing there (a partial leftover has already been removed).
    Absent,
}

/// Decide whether `dir` can be reused for `step`. A directory left behind by
/// an interrupted clone is deleted.
pub fn inspect_checkout(ledger: &StepLedger, step: &str, dir: &Path) -> Result<Checkout> {
    if !dir.exists() {
        return Ok(Checkout::Absent);
    }
    if ledger.status(step) == StepStatus::InProgress {
        println!(
            "{step} checkout at {} is incomplete (interrupted clone), removing",
            dir.display()
        );
        std::fs::remove_dir_all(dir).with_context(|| format!("Removing {}", dir.display()))?;
        return Ok(Checkout::Absent);
    }
    Ok(Checkout::Present)
}
