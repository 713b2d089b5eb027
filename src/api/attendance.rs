use crate::{
    error::ApiError,
    model::attendance::{
        AttendanceListMeta, AttendanceListResponse, AttendanceMarkResponse, AttendanceQuery,
        AttendanceStatus, UpsertAttendance,
    },
    repo,
    validation::parse_ymd,
};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Attendance for a day
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Every employee with their status for the day", body = AttendanceListResponse, example = json!({
            "data": [
                {
                    "employeeId": "EMP-001",
                    "fullName": "John Smith",
                    "email": "john.smith@company.com",
                    "department": "Engineering",
                    "status": "present"
                },
                {
                    "employeeId": "EMP-002",
                    "fullName": "Mary Jones",
                    "email": "mary.jones@company.com",
                    "department": "Sales",
                    "status": null
                }
            ],
            "meta": { "date": "2024-01-01" }
        })),
        (status = 400, description = "Missing or malformed date", body = crate::error::ErrorEnvelope),
        (status = 500, description = "Internal server error", body = crate::error::ErrorEnvelope)
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_list", skip(pool, query), fields(date = %query.date))]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    let date = parse_ymd(&query.date).ok_or_else(|| ApiError::validation("date must be YYYY-MM-DD"))?;

    let rows = repo::attendance::list_for_date(pool.get_ref(), date).await?;
    debug!(rows = rows.len(), "Fetched attendance");

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data: rows,
        meta: AttendanceListMeta { date },
    }))
}

/// Mark attendance
#[utoipa::path(
    put,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpsertAttendance,
    responses(
        (status = 200, description = "Attendance recorded, replacing any earlier status for that day", body = AttendanceMarkResponse, example = json!({
            "data": { "employeeId": "EMP-001", "date": "2024-01-01", "status": "absent" }
        })),
        (status = 400, description = "Blank employee id, malformed date or unknown status", body = crate::error::ErrorEnvelope),
        (status = 404, description = "Employee not found", body = crate::error::ErrorEnvelope),
        (status = 500, description = "Internal server error", body = crate::error::ErrorEnvelope)
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_upsert", skip(pool, path, payload), fields(employee_id = %path.as_str(), date = %payload.date))]
pub async fn upsert_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpsertAttendance>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner().trim().to_string();
    if employee_id.is_empty() {
        return Err(ApiError::validation("employeeId is required"));
    }

    payload.validate()?;
    let date =
        parse_ymd(&payload.date).ok_or_else(|| ApiError::validation("date must be YYYY-MM-DD"))?;
    let status = AttendanceStatus::from_str(&payload.status)
        .map_err(|_| ApiError::validation("status must be one of: present, absent"))?;

    if !repo::employee::exists(pool.get_ref(), &employee_id).await? {
        return Err(ApiError::not_found("Employee not found"));
    }

    let record = repo::attendance::upsert(pool.get_ref(), &employee_id, date, status, Utc::now()).await?;

    info!(%status, "Attendance recorded");

    Ok(HttpResponse::Ok().json(AttendanceMarkResponse {
        data: record.into(),
    }))
}
