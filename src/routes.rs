use crate::{
    api::{self, attendance, employee, health},
    config::Config,
    error::{json_error_handler, path_error_handler, query_error_handler},
};
use actix_web::{Resource, web};

const JSON_LIMIT: usize = 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Wrong method on a known path answers like an unknown route
    fn resource(path: &str) -> Resource {
        web::resource(path).default_service(web::to(api::not_found))
    }

    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(resource("/health").route(web::get().to(health::health)))
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{employee_id}
                    .service(
                        resource("/{employee_id}")
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance?date=YYYY-MM-DD
                    .service(resource("").route(web::get().to(attendance::list_attendance)))
                    // /attendance/{employee_id}
                    .service(
                        resource("/{employee_id}")
                            .route(web::put().to(attendance::upsert_attendance)),
                    ),
            ),
    );

    cfg.default_service(web::to(api::not_found));
}
