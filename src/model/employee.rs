use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validation::validate_email;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "EMP-001",
        "fullName": "John Smith",
        "email": "john.smith@company.com",
        "department": "Engineering",
        "createdAt": "2024-01-01T09:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Smith")]
    pub full_name: String,

    #[schema(example = "john.smith@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Create payload. Missing fields deserialize as empty strings so they are
/// reported per field by validation instead of failing JSON parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    #[validate(length(min = 1, message = "employeeId is required"))]
    pub employee_id: String,

    #[schema(example = "John Smith")]
    #[validate(length(min = 1, message = "fullName is required"))]
    pub full_name: String,

    #[schema(example = "john.smith@company.com", format = "email")]
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[schema(example = "Engineering")]
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
}

impl CreateEmployee {
    pub fn trimmed(self) -> Self {
        Self {
            employee_id: self.employee_id.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    /// Substring of employee id, full name or email
    #[param(example = "smi")]
    pub q: Option<String>,
    /// Exact department name
    #[param(example = "Engineering")]
    pub department: Option<String>,
}

impl EmployeeFilter {
    /// Blank filters are treated as absent.
    pub fn q(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn department(&self) -> Option<&str> {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub data: Employee,
}
