pub mod attendance;
pub mod employee;
pub mod health;

use crate::error::ApiError;
use actix_web::{HttpRequest, HttpResponse};

/// Fallback for unmatched routes and methods.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::not_found(format!(
        "Route not found: {} {}",
        req.method(),
        req.path()
    )))
}
