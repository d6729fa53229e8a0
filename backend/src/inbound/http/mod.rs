//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

pub mod error;
pub mod exercises;
pub mod health;
pub mod landing;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Build the `/api` scope with every user and exercise endpoint.
///
/// JSON, form and query extractor rejections are rendered with the same
/// error envelope as domain failures.
pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::FormConfig::default().error_handler(validation::form_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .service(users::create_user)
        .service(users::list_users)
        .service(exercises::add_exercise)
        .service(exercises::get_log)
}
