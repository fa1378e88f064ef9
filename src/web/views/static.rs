use poem::{handler, IntoResponse};

const CACHE_CONTROL: &str = "public, max-age=86400";

#[handler]
pub async fn get_index_js() -> impl IntoResponse {
    include_bytes!("static/index.js")
        .with_content_type("application/javascript")
        .with_header("Cache-Control", CACHE_CONTROL)
}
