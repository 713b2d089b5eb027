use crate::{
    error::ApiError,
    model::employee::{CreateEmployee, EmployeeFilter, EmployeeListResponse, EmployeeResponse},
    repo,
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};
use validator::Validate;

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Employees ordered by full name", body = EmployeeListResponse),
        (status = 400, description = "Malformed query string", body = crate::error::ErrorEnvelope),
        (status = 500, description = "Internal server error", body = crate::error::ErrorEnvelope)
    ),
    tag = "Employee"
)]
#[instrument(name = "employee_list", skip(pool, query), fields(q = ?query.q, department = ?query.department))]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeFilter>,
) -> Result<HttpResponse, ApiError> {
    let employees = repo::employee::list(pool.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse { data: employees }))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Missing or malformed field", body = crate::error::ErrorEnvelope, example = json!({
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "Invalid request",
                "details": {
                    "formErrors": [],
                    "fieldErrors": { "email": ["email must be a valid email"] }
                }
            }
        })),
        (status = 409, description = "Employee id or email already in use", body = crate::error::ErrorEnvelope, example = json!({
            "error": { "code": "DUPLICATE_EMPLOYEE_ID", "message": "Employee ID already exists" }
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorEnvelope)
    ),
    tag = "Employee"
)]
#[instrument(name = "employee_create", skip(pool, payload), fields(employee_id = %payload.employee_id))]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner().trimmed();
    input.validate()?;

    // id first, so a request clashing on both reports the id
    if repo::employee::exists(pool.get_ref(), &input.employee_id).await? {
        info!("Rejected: employee id already exists");
        return Err(ApiError::DuplicateEmployeeId);
    }

    if repo::employee::email_taken(pool.get_ref(), &input.email).await? {
        info!("Rejected: email already exists");
        return Err(ApiError::DuplicateEmail);
    }

    let employee = repo::employee::insert(pool.get_ref(), &input, Utc::now())
        .await
        .map_err(duplicate_or_internal)?;

    info!("Employee created");

    Ok(HttpResponse::Created().json(EmployeeResponse { data: employee }))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee and their attendance deleted"),
        (status = 400, description = "Blank employee id", body = crate::error::ErrorEnvelope),
        (status = 404, description = "Employee not found", body = crate::error::ErrorEnvelope, example = json!({
            "error": { "code": "NOT_FOUND", "message": "Employee not found" }
        })),
        (status = 500, description = "Internal server error", body = crate::error::ErrorEnvelope)
    ),
    tag = "Employee"
)]
#[instrument(name = "employee_delete", skip(pool, path), fields(employee_id = %path.as_str()))]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner().trim().to_string();
    if employee_id.is_empty() {
        return Err(ApiError::validation("employeeId is required"));
    }

    let removed = repo::employee::delete(pool.get_ref(), &employee_id).await?;
    if removed == 0 {
        return Err(ApiError::not_found("Employee not found"));
    }

    info!("Employee deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// Two concurrent creates can both pass the existence checks; the loser hits
/// the unique index and still gets the matching 409.
fn duplicate_or_internal(err: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return if db_err.message().contains("employees.email") {
                ApiError::DuplicateEmail
            } else {
                ApiError::DuplicateEmployeeId
            };
        }
    }
    err.into()
}
