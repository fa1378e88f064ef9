use std::collections::BTreeMap;

use poem::{Endpoint, Middleware, Request, Result};
use sentry::protocol::Context;

/// Tags the Sentry scope with the request, so that events raised while handling it point back to it.
pub struct SentryMiddleware;

impl<E: Endpoint> Middleware<E> for SentryMiddleware {
    type Output = SentryMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SentryMiddlewareImpl { ep }
    }
}

pub struct SentryMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SentryMiddlewareImpl<E> {
    type Output = E::Output;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        sentry::configure_scope(|scope| {
            scope.set_tag("request.method", request.method().as_str());
            scope.set_tag("request.path", request.uri().path());

            let mut context = BTreeMap::new();
            context.insert("query".to_string(), request.uri().query().into());
            if let Some(language) = request
                .headers()
                .get("Accept-Language")
                .and_then(|value| value.to_str().ok())
            {
                context.insert("accept_language".to_string(), language.into());
            }
            scope.set_context("request", Context::Other(context));
        });
        self.ep.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::web::test::{create_test_client, read_text};

    #[tokio::test]
    async fn tagged_request_ok() -> Result {
        let client = create_test_client()?;
        let response = client
            .get("/")
            .query("rooms", &3)
            .header("Accept-Language", "en")
            .send()
            .await;
        response.assert_status_is_ok();
        assert!(read_text(response).await?.contains("Property type"));
        Ok(())
    }
}
