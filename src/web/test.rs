use poem::test::{TestClient, TestResponse};
use poem::Endpoint;

use crate::model::fixtures;
use crate::prelude::*;
use crate::web::create_app;

pub fn create_test_client() -> Result<TestClient<impl Endpoint>> {
    let app = create_app(Arc::new(fixtures::bundle()?))?;
    Ok(TestClient::new(app))
}

pub async fn read_text(response: TestResponse) -> Result<String> {
    Ok(response.0.into_body().into_string().await?)
}
