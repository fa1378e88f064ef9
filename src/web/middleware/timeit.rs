use poem::{Endpoint, Middleware, Request, Response, Result};

use crate::prelude::*;

/// Logs how long every request has taken, failed ones included.
pub struct TimeItMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for TimeItMiddleware {
    type Output = TimeItMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TimeItMiddlewareImpl { ep }
    }
}

pub struct TimeItMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for TimeItMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let start_instant = Instant::now();
        let response = self.ep.call(request).await;
        let status = response.as_ref().map_or_else(|error| error.status(), Response::status);
        info!(elapsed = ?start_instant.elapsed(), ?method, ?uri, %status, "done");
        response
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::web::test::create_test_client;

    #[tokio::test]
    async fn timed_request_ok() -> Result {
        let client = create_test_client()?;
        let response = client.get("/api/importance").query("top", &1).send().await;
        response.assert_status_is_ok();
        response.json().await.value().array().assert_len(1);
        Ok(())
    }
}
