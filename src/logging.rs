use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::opts::SentryOpts;
use crate::prelude::*;

/// Initialises Sentry and the tracing subscriber.
///
/// Warnings and errors go to Sentry as events, the rest as breadcrumbs.
pub fn init(opts: &SentryOpts) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        opts.sentry_dsn.as_deref(),
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate: opts.traces_sample_rate,
            ..Default::default()
        },
    ));

    let sentry_filter = EnvFilter::try_from_env("HOME_PRICE_SENTRY_LOG")
        .or_else(|_| EnvFilter::try_new("home_price=debug"))?;
    let sentry_layer = sentry::integrations::tracing::layer()
        .event_filter(|metadata| match metadata.level() {
            &Level::ERROR | &Level::WARN => EventFilter::Event,
            &Level::INFO | &Level::DEBUG | &Level::TRACE => EventFilter::Breadcrumb,
        })
        .span_filter(|metadata| metadata.level() != &Level::TRACE)
        .with_filter(sentry_filter);

    let format_filter = EnvFilter::try_from_env("HOME_PRICE_LOG")
        .or_else(|_| EnvFilter::try_new("home_price=info,poem=info"))?;
    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(format_filter);

    tracing_subscriber::Registry::default()
        .with(sentry_layer)
        .with(format_layer)
        .try_init()
        .context("failed to initialize the tracing subscriber")?;

    Ok(guard)
}

pub fn format_elapsed(instant: Instant) -> String {
    humantime::format_duration(instant.elapsed()).to_string()
}
