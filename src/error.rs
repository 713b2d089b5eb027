use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::validation;

pub const GENERIC_MESSAGE: &str = "Something went wrong";

/// Stable machine-readable codes carried in every error envelope.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    NotFound,
    DuplicateEmployeeId,
    DuplicateEmail,
    InternalServerError,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": {
        "code": "NOT_FOUND",
        "message": "Employee not found"
    }
}))]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, nullable = true)]
    pub details: Option<Value>,
}

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", message)]
    Validation {
        message: String,
        details: Option<Value>,
    },

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "Employee ID already exists")]
    DuplicateEmployeeId,

    #[display(fmt = "Email already exists")]
    DuplicateEmail,

    /// Never shown to the caller; the cause is logged where it happens.
    #[display(fmt = "{}", GENERIC_MESSAGE)]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// Rejected request that never reached a handler (bad JSON, bad query string).
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ApiError::Validation {
            message: "Invalid request".to_string(),
            details: Some(json!({ "formErrors": [reason.into()], "fieldErrors": {} })),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Validation { .. } => ErrorCode::ValidationError,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::DuplicateEmployeeId => ErrorCode::DuplicateEmployeeId,
            ApiError::DuplicateEmail => ErrorCode::DuplicateEmail,
            ApiError::Internal => ErrorCode::InternalServerError,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let details = match self {
            ApiError::Validation { details, .. } => details.clone(),
            _ => None,
        };

        ErrorEnvelope {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
                details,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmployeeId | ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation {
            message: "Invalid request".to_string(),
            details: Some(validation::flatten(&errors)),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        error!(error = %err, "database error");
        ApiError::Internal
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid_request(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid_request(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::invalid_request(err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn codes_render_in_screaming_snake_case() {
        assert_eq!(ErrorCode::DuplicateEmployeeId.to_string(), "DUPLICATE_EMPLOYEE_ID");
        assert_eq!(
            serde_json::to_value(ErrorCode::InternalServerError).unwrap(),
            json!("INTERNAL_SERVER_ERROR")
        );
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::DuplicateEmployeeId.status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_error_hides_details() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({ "error": { "code": "INTERNAL_SERVER_ERROR", "message": "Something went wrong" } })
        );
    }

    #[actix_web::test]
    async fn duplicate_email_envelope() {
        let body = to_bytes(ApiError::DuplicateEmail.error_response().into_body())
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
        assert_eq!(body["error"]["message"], "Email already exists");
        assert!(body["error"].get("details").is_none());
    }
}
