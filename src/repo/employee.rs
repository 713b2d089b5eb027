use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::model::employee::{CreateEmployee, Employee, EmployeeFilter};

const COLUMNS: &str = "employee_id, full_name, email, department, created_at";

/// Matching employees ordered by full name. `q` is a literal substring
/// (LIKE wildcards in it are escaped) over id, name and email.
pub async fn list(pool: &SqlitePool, filter: &EmployeeFilter) -> Result<Vec<Employee>, sqlx::Error> {
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(q) = filter.q() {
        conditions.push(
            r"(employee_id LIKE ? ESCAPE '\' OR full_name LIKE ? ESCAPE '\' OR email LIKE ? ESCAPE '\')",
        );
        let like = format!("%{}%", escape_like(q));
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }

    if let Some(department) = filter.department() {
        conditions.push("department = ?");
        bindings.push(department.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT {COLUMNS} FROM employees {where_clause} ORDER BY full_name ASC, employee_id ASC"
    );
    debug!(sql = %sql, bindings = ?bindings, "Fetching employees");

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    for b in &bindings {
        query = query.bind(b);
    }

    query.fetch_all(pool).await
}

pub async fn exists(pool: &SqlitePool, employee_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ?)")
        .bind(employee_id)
        .fetch_one(pool)
        .await
}

pub async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await
}

pub async fn insert(
    pool: &SqlitePool,
    input: &CreateEmployee,
    created_at: DateTime<Utc>,
) -> Result<Employee, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&input.employee_id)
    .bind(&input.full_name)
    .bind(&input.email)
    .bind(&input.department)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

/// Number of rows removed; attendance rows go with it through the foreign key.
pub async fn delete(pool: &SqlitePool, employee_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
