use std::io::{self, Write};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};

use hr_records::client::views::{Confirmation, attendance_table, delete_prompt, employees_table};
use hr_records::client::{ClientError, DEFAULT_BASE_URL, HrClient};
use hr_records::model::attendance::AttendanceStatus;
use hr_records::model::employee::{CreateEmployee, EmployeeFilter};
use hr_records::validation::parse_ymd;

/// Command-line front end for the HR records API.
#[derive(Parser)]
#[command(name = "hrctl", version, about)]
struct Cli {
    /// API base url, including the prefix
    #[arg(long, env = "HR_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the API is up
    Health,
    #[command(subcommand)]
    Employees(EmployeesCommand),
    #[command(subcommand)]
    Attendance(AttendanceCommand),
}

#[derive(Subcommand)]
enum EmployeesCommand {
    /// List employees, optionally filtered
    List {
        /// Search id, name or email
        #[arg(long)]
        q: Option<String>,
        /// Exact department
        #[arg(long)]
        department: Option<String>,
    },
    /// Add an employee
    Add(AddEmployee),
    /// Delete an employee and their attendance
    Delete {
        employee_id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args)]
struct AddEmployee {
    #[arg(long = "id")]
    employee_id: String,
    #[arg(long = "name")]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    department: String,
}

#[derive(Subcommand)]
enum AttendanceCommand {
    /// Show every employee's status for a day
    Show {
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Mark an employee present or absent
    Mark {
        employee_id: String,
        status: StatusArg,
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Present,
    Absent,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Present => AttendanceStatus::Present,
            StatusArg::Absent => AttendanceStatus::Absent,
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_ymd(raw).ok_or_else(|| "date must be YYYY-MM-DD".to_string())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn confirm(prompt: &str) -> Confirmation {
    print!("{prompt}");
    if let Err(err) = io::stdout().flush() {
        return Confirmation::Unreadable(err.to_string());
    }
    Confirmation::read(&mut io::stdin().lock())
}

async fn run(client: &HrClient, command: Command) -> Result<ExitCode, ClientError> {
    match command {
        Command::Health => {
            let health = client.health().await?;
            println!("{} is {}", client.base_url(), health.status);
        }
        Command::Employees(EmployeesCommand::List { q, department }) => {
            let employees = client
                .list_employees(&EmployeeFilter { q, department })
                .await?;
            print!("{}", employees_table(&employees));
        }
        Command::Employees(EmployeesCommand::Add(add)) => {
            let employee = client
                .create_employee(&CreateEmployee {
                    employee_id: add.employee_id,
                    full_name: add.full_name,
                    email: add.email,
                    department: add.department,
                })
                .await?;
            println!("Employee {} added", employee.employee_id);
        }
        Command::Employees(EmployeesCommand::Delete { employee_id, yes }) => {
            if !yes {
                match confirm(&delete_prompt(&employee_id)) {
                    Confirmation::Proceed => {}
                    Confirmation::Cancelled => {
                        println!("Cancelled");
                        return Ok(ExitCode::SUCCESS);
                    }
                    Confirmation::Unreadable(err) => {
                        eprintln!("error: could not read confirmation: {err}");
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
            client.delete_employee(&employee_id).await?;
            println!("Employee {employee_id} deleted");
        }
        Command::Attendance(AttendanceCommand::Show { date }) => {
            let sheet = client.list_attendance(date.unwrap_or_else(today)).await?;
            print!("{}", attendance_table(sheet.meta.date, &sheet.data));
        }
        Command::Attendance(AttendanceCommand::Mark {
            employee_id,
            status,
            date,
        }) => {
            let mark = client
                .upsert_attendance(&employee_id, date.unwrap_or_else(today), status.into())
                .await?;
            println!(
                "{} marked {} on {}",
                mark.employee_id,
                mark.status,
                mark.date.format("%Y-%m-%d")
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let client = match HrClient::new(&cli.base_url) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    match run(&client, cli.command).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err.message());
            if let ClientError::Api {
                details: Some(details),
                ..
            } = &err
            {
                eprintln!("{details:#}");
            }
            ExitCode::FAILURE
        }
    }
}
