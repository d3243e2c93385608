// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use bookingsync_core::{
    BookingService, ChangeKind, EditingSession, EventStore, MutationEvent, Outcome, RecordId,
    Synchronizer,
};
use bookingsync_dataverse::DataverseClient;
use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use tokio::fs;

use crate::config::Config;
use crate::dry_run::DryRunService;
use crate::script::{Step, parse_script};

#[derive(Debug, Clone)]
pub struct CmdReplay {
    pub file: PathBuf,
    pub dry_run: bool,
}

impl CmdReplay {
    pub const NAME: &str = "replay";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Replay a recorded grid session against the booking service")
            .arg(
                arg!(<FILE> "JSON-lines file of editor and change steps")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(--"dry-run" "Log the requests instead of sending them"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: matches
                .get_one::<PathBuf>("FILE")
                .cloned()
                .unwrap_or_default(),
            dry_run: matches.get_flag("dry-run"),
        }
    }

    pub async fn run(self, config: Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "replaying session...");
        let text = fs::read_to_string(&self.file)
            .await
            .map_err(|e| format!("Failed to read {}: {e}", self.file.display()))?;
        let steps = parse_script(&text)?;

        let store = Arc::new(EventStore::new());
        let summary = if self.dry_run {
            let sync = Synchronizer::new(DryRunService, store, config.sync);
            replay(&sync, steps).await?
        } else {
            let dataverse = config
                .dataverse
                .ok_or("No [dataverse] section configured, pass --config or use --dry-run")?;
            let client = DataverseClient::new(dataverse)?;
            let sync = Synchronizer::new(client, store, config.sync);
            replay(&sync, steps).await?
        };

        println!(
            "{} {} steps, {} remote calls",
            "Done:".green(),
            summary.steps,
            summary.remote_calls
        );
        Ok(())
    }
}

/// Counters of a finished replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub steps: usize,
    pub remote_calls: usize,
}

/// Feeds `steps` to the synchronizer, keeping its store in line with what
/// the grid would hold. Stops at the first failed step.
pub async fn replay<C: BookingService>(
    sync: &Synchronizer<C, Arc<EventStore>>,
    steps: Vec<Step>,
) -> Result<Summary, Box<dyn Error>> {
    let mut session = EditingSession::new();
    let mut retired: HashSet<RecordId> = HashSet::new();
    let mut summary = Summary::default();

    for (n, step) in steps.into_iter().enumerate() {
        summary.steps += 1;
        let event = match step {
            Step::Editor { open } => {
                session.set_editing(open);
                println!("{:>4} {}", n + 1, format!("editor open: {open}").dimmed());
                continue;
            }
            Step::Change(event) => event,
        };

        stage(sync.store(), &event, &retired);
        let outcome = sync
            .synchronize(&session, &event)
            .await
            .map_err(|e| format!("step {}: {e}", n + 1))?;
        settle(sync.store(), &event, &outcome, &mut retired);

        match &outcome {
            Outcome::Created { .. } | Outcome::Updated(_) | Outcome::Deleted(_) => {
                summary.remote_calls += 1;
                println!("{:>4} {}", n + 1, outcome.to_string().green());
            }
            _ => println!("{:>4} {}", n + 1, outcome.to_string().dimmed()),
        }
    }

    Ok(summary)
}

/// Puts the event's record into the store before it is synchronized.
fn stage(store: &EventStore, event: &MutationEvent, retired: &HashSet<RecordId>) {
    let Some(record) = event.record.as_ref().and_then(|r| r.as_booking()) else {
        return;
    };

    match event.kind {
        // A retired placeholder already lives on under its booking key
        ChangeKind::Add | ChangeKind::Update if !retired.contains(&record.id) => {
            store.upsert(record.clone());
        }
        _ => {}
    }
}

/// Applies what the grid does once the event went through.
fn settle(
    store: &EventStore,
    event: &MutationEvent,
    outcome: &Outcome,
    retired: &mut HashSet<RecordId>,
) {
    if let Outcome::Created { placeholder, .. } = outcome {
        retired.insert(placeholder.clone());
    }

    if event.kind != ChangeKind::Remove {
        return;
    }
    if let Some(record) = event.record.as_ref().and_then(|r| r.as_booking()) {
        store.remove(&record.id);
    }
    if let Outcome::Deleted(booking) = outcome {
        store.remove(&RecordId::Permanent(booking.clone()));
    }
}
