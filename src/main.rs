use std::io;
use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use employee_api::config::AppConfig;
use employee_api::db::{self, EmployeeStore, MemoryEmployeeStore, PgEmployeeStore};
use employee_api::handlers;
use employee_api::services::employee::EmployeeService;
use employee_api::utils::validation::EmployeeValidator;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let store: Arc<dyn EmployeeStore> = match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url, config.database_max_connections)
                .await
                .map_err(io::Error::other)?;
            if config.run_migrations {
                db::run_migrations(&pool).await.map_err(io::Error::other)?;
            }
            Arc::new(PgEmployeeStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set, employees are kept in memory");
            Arc::new(MemoryEmployeeStore::new())
        }
    };

    let service = web::Data::new(EmployeeService::new(store, EmployeeValidator::new()));

    info!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(handlers::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
