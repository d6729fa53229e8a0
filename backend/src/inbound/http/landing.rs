//! Static landing page describing the API.

use actix_web::{HttpResponse, get, http::header::ContentType};

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Serve the bundled HTML landing page.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
