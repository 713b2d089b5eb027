use chrono::NaiveDate;
use std::io::BufRead;

use crate::model::attendance::AttendanceRow;
use crate::model::employee::Employee;

const NO_STATUS: &str = "—";

pub fn employees_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees found.\n".to_string();
    }

    let rows: Vec<[String; 5]> = employees
        .iter()
        .map(|e| {
            [
                e.employee_id.clone(),
                e.full_name.clone(),
                e.email.clone(),
                e.department.clone(),
                e.created_at.format("%Y-%m-%d").to_string(),
            ]
        })
        .collect();

    render(["ID", "NAME", "EMAIL", "DEPARTMENT", "CREATED"], &rows)
}

pub fn attendance_table(date: NaiveDate, rows: &[AttendanceRow]) -> String {
    let mut out = format!("Attendance for {}\n", date.format("%Y-%m-%d"));

    if rows.is_empty() {
        out.push_str("No employees found.\n");
        return out;
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.employee_id.clone(),
                r.full_name.clone(),
                r.department.clone(),
                r.status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| NO_STATUS.to_string()),
            ]
        })
        .collect();

    out.push_str(&render(["ID", "NAME", "DEPARTMENT", "STATUS"], &cells));

    let marked = rows.iter().filter(|r| r.status.is_some()).count();
    out.push_str(&format!("{marked} of {} marked\n", rows.len()));
    out
}

/// Delete confirmation wording; the caller decides how to read the answer.
pub fn delete_prompt(employee_id: &str) -> String {
    format!("Delete employee {employee_id} and all of their attendance records? [y/N] ")
}

pub fn is_confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Outcome of asking before a destructive command.
#[derive(Debug, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Cancelled,
    /// The answer could not be read; the command must fail rather than succeed quietly.
    Unreadable(String),
}

impl Confirmation {
    pub fn read(input: &mut impl BufRead) -> Self {
        let mut answer = String::new();
        match input.read_line(&mut answer) {
            Ok(_) if is_confirmed(&answer) => Confirmation::Proceed,
            Ok(_) => Confirmation::Cancelled,
            Err(err) => Confirmation::Unreadable(err.to_string()),
        }
    }
}

fn render<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    for row in rows {
        push_line(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
