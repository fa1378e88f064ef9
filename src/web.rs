use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Response, Route, Server};

use crate::model::ModelBundle;
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::{
    ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware, TimeItMiddleware,
};

mod i18n;
mod middleware;
mod partials;
#[cfg(test)]
mod test;
mod views;

#[instrument(skip_all, fields(host = opts.host.as_str(), port = opts.port))]
pub async fn run(opts: WebOpts) -> Result {
    let bundle = ModelBundle::load(&opts.model.path)
        .with_context(|| format!("failed to load the model from `{}`", opts.model.path.display()))?;
    let app = create_app(Arc::new(bundle))?;
    info!("listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run(app)
        .await?;
    Ok(())
}

/// Builds the application around the loaded bundle.
pub fn create_app(bundle: Arc<ModelBundle>) -> Result<impl Endpoint<Output = Response>> {
    let app = Route::new()
        .at("/", get(views::index::get))
        .at("/static/index.js", get(views::r#static::get_index_js))
        .at("/api/predict", post(views::api::post_predict))
        .at("/api/importance", get(views::api::get_importance))
        .at("/api/health", get(views::api::get_health))
        .data(bundle)
        .data(i18n::build_resources()?)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(TimeItMiddleware)
        .with(SentryMiddleware);
    Ok(app)
}
