use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::model::attendance::{AttendanceRecord, AttendanceRow, AttendanceStatus};

/// Every employee with their status for `date` (null when unrecorded), by full name.
pub async fn list_for_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<AttendanceRow>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRow>(
        r#"
        SELECT
            e.employee_id,
            e.full_name,
            e.email,
            e.department,
            a.status
        FROM employees e
        LEFT JOIN attendance a
            ON a.employee_id = e.employee_id
            AND a.date = ?
        ORDER BY e.full_name ASC, e.employee_id ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Single-statement insert-or-overwrite keyed on (employee_id, date).
/// On overwrite only `status` and `updated_at` change.
pub async fn upsert(
    pool: &SqlitePool,
    employee_id: &str,
    date: NaiveDate,
    status: AttendanceStatus,
    now: DateTime<Utc>,
) -> Result<AttendanceRecord, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        INSERT INTO attendance (employee_id, date, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (employee_id, date)
        DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at
        RETURNING id, employee_id, date, status, created_at, updated_at
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(status)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}
