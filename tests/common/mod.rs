#![allow(dead_code, unused_macros)]

use hr_records::config::Config;
use hr_records::db::init_db;
use serde_json::{Value, json};
use sqlx::SqlitePool;

pub async fn test_pool() -> SqlitePool {
    init_db("sqlite::memory:", 1)
        .await
        .expect("in-memory database")
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        ..Config::default()
    }
}

pub fn employee_json(id: &str, name: &str, email: &str, department: &str) -> Value {
    json!({
        "employeeId": id,
        "fullName": name,
        "email": email,
        "department": department,
    })
}

/// Builds the service under test with the same routing as the server binary.
macro_rules! test_app {
    ($pool:expr) => {{
        let config = $crate::common::test_config();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(|cfg| hr_records::routes::configure(cfg, &config)),
        )
        .await
    }};
}
