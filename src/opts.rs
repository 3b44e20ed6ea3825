//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::prelude::*;

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(
        long,
        default_value = "0",
        env = "SENTRY_TRACES_SAMPLE_RATE",
        value_parser = parsers::sample_rate,
    )]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Score(ScoreOpts),
    Inspect(InspectOpts),
}

/// Scores the items for the user
#[derive(Args)]
pub struct ScoreOpts {
    #[command(flatten)]
    pub model: ModelOpts,

    /// User ID
    #[arg(short, long = "user", allow_negative_numbers = true)]
    pub user_id: UserId,

    /// Item IDs to score, may be repeated or comma-separated
    #[arg(
        short,
        long = "item",
        value_delimiter = ',',
        required = true,
        allow_hyphen_values = true,
    )]
    pub item_ids: Vec<ItemId>,

    /// Print only the best scored items
    #[arg(long, value_parser = parsers::non_zero_usize)]
    pub top: Option<usize>,
}

/// Prints the model summary
#[derive(Args)]
pub struct InspectOpts {
    #[command(flatten)]
    pub model: ModelOpts,
}

#[derive(Args)]
pub struct ModelOpts {
    /// Model snapshot JSON file
    #[arg(short, long = "model", env = "LATENT_SCORER_MODEL")]
    pub model_path: PathBuf,
}
