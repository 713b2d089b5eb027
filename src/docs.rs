use crate::api::health::HealthResponse;
use crate::error::{ErrorBody, ErrorCode, ErrorEnvelope};
use crate::model::attendance::{
    AttendanceListMeta, AttendanceListResponse, AttendanceMark, AttendanceMarkResponse,
    AttendanceRow, AttendanceStatus, UpsertAttendance,
};
use crate::model::employee::{CreateEmployee, Employee, EmployeeListResponse, EmployeeResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Records API",
        version = "1.0.0",
        description = r#"
## HR Records

Employee directory and daily attendance.

### Resources
- **Employees**: create, list with search and department filter, delete
  (deleting an employee removes their attendance too)
- **Attendance**: per-day sheet of every employee, one present/absent mark
  per employee and day

### Errors
Every 4xx/5xx carries `{ "error": { "code", "message", "details"? } }`.
Codes: `VALIDATION_ERROR`, `NOT_FOUND`, `DUPLICATE_EMPLOYEE_ID`,
`DUPLICATE_EMAIL`, `INTERNAL_SERVER_ERROR`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::upsert_attendance
    ),
    components(
        schemas(
            HealthResponse,
            ErrorEnvelope,
            ErrorBody,
            ErrorCode,
            Employee,
            CreateEmployee,
            EmployeeListResponse,
            EmployeeResponse,
            AttendanceStatus,
            AttendanceRow,
            AttendanceListMeta,
            AttendanceListResponse,
            UpsertAttendance,
            AttendanceMark,
            AttendanceMarkResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;
