use clap::Parser;
use latent_scorer::opts::{Opts, Subcommand};
use latent_scorer::prelude::*;
use latent_scorer::{commands, helpers};

fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = helpers::tracing::init(opts.sentry_dsn.clone(), opts.traces_sample_rate)?;

    let result = match opts.subcommand {
        Subcommand::Score(opts) => commands::score(&opts),
        Subcommand::Inspect(opts) => commands::inspect(&opts),
    };
    if let Err(error) = &result {
        sentry::integrations::anyhow::capture_anyhow(error);
    }
    result
}
