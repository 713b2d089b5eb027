use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::{validate_status, validate_ymd};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumVariantNames,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Stored row; at most one per (employee, date).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One employee for a given day; `status` is null when nothing was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "EMP-001",
        "fullName": "John Smith",
        "email": "john.smith@company.com",
        "department": "Engineering",
        "status": "present"
    })
)]
pub struct AttendanceRow {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    #[schema(nullable = true)]
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Day to list, `YYYY-MM-DD`
    #[param(example = "2024-01-01")]
    #[validate(custom(function = "validate_ymd"))]
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpsertAttendance {
    #[schema(example = "2024-01-01", format = "date")]
    #[validate(custom(function = "validate_ymd"))]
    pub date: String,

    #[schema(example = "present")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

/// Result of an upsert, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMark {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl From<AttendanceRecord> for AttendanceMark {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            employee_id: record.employee_id,
            date: record.date,
            status: record.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceListMeta {
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRow>,
    pub meta: AttendanceListMeta,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceMarkResponse {
    pub data: AttendanceMark,
}
