use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_macros::{FromRequest, FromRequestParts};

use serde::Serialize;
use tracing::error;
use utoipa::openapi::{RefOr, Schema};
use utoipa::{ToSchema, openapi};

use validator::ValidationErrors;

/// Contains diagnostic information about an API failure. Every failure is reported with status
/// 400; [error_code](BasicErrorResponse::error_code) tells the kinds apart.
#[derive(Serialize, Debug, ToSchema)]
pub struct BasicErrorResponse {
    /// Human readable description of what went wrong
    #[schema(example = "no such table: todos")]
    error: String,
    /// One of "storage_failure", "invalid_input", "invalid_json" or "invalid_path"
    #[schema(example = "storage_failure")]
    error_code: String,
    extra_info: Option<ExtraInfo>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(untagged)]
pub enum ExtraInfo {
    ValidationIssues(ValidationErrorSchema),
    Message(String),
}

/// Stand-in OpenAPI schema for [ValidationErrors] which just provides an empty object
#[derive(Serialize, Debug)]
#[serde(transparent)]
pub struct ValidationErrorSchema(ValidationErrors);

impl<'schem> ToSchema<'schem> for ValidationErrorSchema {
    fn schema() -> (&'schem str, RefOr<Schema>) {
        (
            "ValidationErrorSchema",
            openapi::ObjectBuilder::new().into(),
        )
    }
}

/// Builds the uniform 400 response every failure is reported with
fn bad_request(error_code: &str, error: String, extra_info: Option<ExtraInfo>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(BasicErrorResponse {
            error,
            error_code: error_code.into(),
            extra_info,
        }),
    )
        .into_response()
}

/// Response type that wraps a failed storage operation. The full error chain is passed back
/// to the client.
pub struct GenericErrorResponse(pub anyhow::Error);

impl IntoResponse for GenericErrorResponse {
    fn into_response(self) -> Response {
        let description = format!("{:#}", self.0);
        error!("Storage operation failed: {description}");

        bad_request("storage_failure", description, None)
    }
}

impl From<anyhow::Error> for GenericErrorResponse {
    fn from(value: anyhow::Error) -> Self {
        Self(value)
    }
}

/// Response type that wraps validation errors and turns them into [BasicErrorResponse]s
pub struct ValidationErrorResponse(ValidationErrors);

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        bad_request(
            "invalid_input",
            "Submitted data was invalid.".to_owned(),
            Some(ExtraInfo::ValidationIssues(ValidationErrorSchema(self.0))),
        )
    }
}

impl From<ValidationErrors> for ValidationErrorResponse {
    fn from(value: ValidationErrors) -> Self {
        Self(value)
    }
}

/// Wrapper for [axum::Json] which customizes the error response to use our
/// data structure for API errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonErrorResponse))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Response type representing JSON parse errors
pub struct JsonErrorResponse {
    parse_problem: String,
}

impl From<JsonRejection> for JsonErrorResponse {
    fn from(value: JsonRejection) -> Self {
        JsonErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for JsonErrorResponse {
    fn into_response(self) -> Response {
        bad_request(
            "invalid_json",
            "The passed request body contained malformed or unreadable JSON.".into(),
            Some(ExtraInfo::Message(self.parse_problem)),
        )
    }
}

/// Wrapper for [axum::extract::Path] which reports unparseable path parameters using our
/// data structure for API errors
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PathErrorResponse))]
pub struct Path<T>(pub T);

/// Response type representing path parameters that couldn't be parsed
pub struct PathErrorResponse {
    parse_problem: String,
}

impl From<PathRejection> for PathErrorResponse {
    fn from(value: PathRejection) -> Self {
        PathErrorResponse {
            parse_problem: value.body_text(),
        }
    }
}

impl IntoResponse for PathErrorResponse {
    fn into_response(self) -> Response {
        bad_request(
            "invalid_path",
            "The requested path contained an invalid identifier.".into(),
            Some(ExtraInfo::Message(self.parse_problem)),
        )
    }
}
