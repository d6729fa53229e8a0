//! Shared validation helpers for inbound HTTP adapters.
//!
//! Also hosts the extractor error handlers that turn Actix payload and query
//! rejections into the JSON error envelope.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserId, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyUsername,
    UsernameTooLong,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::UsernameTooLong => "username_too_long",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Map a rejected username onto a 400 with field details.
pub(crate) fn username_error(error: &UserValidationError, value: &str) -> Error {
    let code = match error {
        UserValidationError::UsernameTooLong { .. } => ErrorCode::UsernameTooLong,
        _ => ErrorCode::EmptyUsername,
    };
    ValidationError::new(USERNAME.as_str(), error.to_string()).with_value(code, value)
}

/// Resolve a path identifier into a [`UserId`].
///
/// A malformed identifier can never name a stored user, so it is reported as
/// `not_found` rather than as a bad request.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        Error::not_found(format!("user {raw} not found")).with_details(json!({ "userId": raw }))
    })
}

fn body_error(reason: String) -> actix_web::Error {
    debug!(%reason, "request body rejected");
    Error::invalid_request("request body could not be parsed")
        .with_details(json!({ "code": ErrorCode::InvalidBody.as_str(), "reason": reason }))
        .into()
}

/// `JsonConfig` error handler producing the JSON error envelope.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    body_error(error.to_string())
}

/// `FormConfig` error handler producing the JSON error envelope.
pub fn form_error_handler(error: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    body_error(error.to_string())
}

/// `QueryConfig` error handler producing the JSON error envelope.
pub fn query_error_handler(error: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = error.to_string();
    debug!(%reason, "query string rejected");
    Error::invalid_request("query string could not be parsed")
        .with_details(json!({ "code": ErrorCode::InvalidQuery.as_str(), "reason": reason }))
        .into()
}
