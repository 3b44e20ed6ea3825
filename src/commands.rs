//! Subcommand entry points.

use std::io::Write;

use serde::Serialize;

use crate::helpers::tracing::format_elapsed;
use crate::opts::{InspectOpts, ScoreOpts};
use crate::prelude::*;
use crate::scorer::ScoreResult;
use crate::snapshot::Snapshot;

#[instrument(skip_all, fields(user_id = opts.user_id, n_items = opts.item_ids.len()))]
pub fn score(opts: &ScoreOpts) -> Result {
    let scorer = Snapshot::load(&opts.model.model_path)?.into_scorer();

    let start_instant = Instant::now();
    let scores = scorer.score_items(opts.user_id, opts.item_ids.iter().copied())?;
    info!(n_scored = scores.len(), elapsed = format_elapsed(start_instant).as_str(), "scored");

    write_results(std::io::stdout().lock(), &scores.into_ranked(), opts.top)
}

#[derive(Serialize, Debug, PartialEq)]
struct Summary {
    rank: usize,
    n_users: usize,
    n_items: usize,
    intercept: f64,
}

impl From<&Snapshot> for Summary {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            rank: snapshot.weights.rank(),
            n_users: snapshot.users.len(),
            n_items: snapshot.items.len(),
            intercept: snapshot.biases.intercept,
        }
    }
}

#[instrument(skip_all)]
pub fn inspect(opts: &InspectOpts) -> Result {
    let snapshot = Snapshot::load(&opts.model.model_path)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &Summary::from(&snapshot))?;
    writeln!(stdout)?;
    Ok(())
}

/// Writes the results as JSON lines.
fn write_results(mut writer: impl Write, results: &[ScoreResult], top: Option<usize>) -> Result {
    for result in results.iter().take(top.unwrap_or(usize::MAX)) {
        serde_json::to_writer(&mut writer, result)?;
        writeln!(writer)?;
    }
    writer.flush().context("failed to flush the results")
}
