#![warn(clippy::all)]

use clap::Parser;

use crate::logging::format_elapsed;
use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod features;
mod importance;
mod logging;
mod model;
mod opts;
mod prediction;
mod prelude;
mod units;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = logging::init(&opts.sentry)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let start_instant = Instant::now();
    let result = run_subcommand(opts.subcommand).await;
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    info!(elapsed = %format_elapsed(start_instant), "finished");
    result
}

async fn run_subcommand(subcommand: Subcommand) -> Result {
    match subcommand {
        Subcommand::Web(opts) => {
            sentry::configure_scope(|scope| scope.set_tag("app", "web"));
            web::run(opts).await
        }
        Subcommand::Predict(opts) => {
            sentry::configure_scope(|scope| scope.set_tag("app", "predict"));
            prediction::run(opts)
        }
        Subcommand::Importance(opts) => {
            sentry::configure_scope(|scope| scope.set_tag("app", "importance"));
            importance::run(opts)
        }
    }
}
