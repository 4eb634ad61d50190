mod config;
mod db;
mod error;
mod i18n;
mod referencedata;
mod reporting;
mod security;
mod services;
mod state;

use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::{error, info};

use crate::config::AppConfig;
use crate::db::{DataSource, Database};
use crate::i18n::MessageService;
use crate::reporting::ReportsViewService;
use crate::state::RemoteServices;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let database = Database::new(&config.database_path);
    database.init_schema().map_err(|e| {
        error!("unable to prepare {}: {}", config.database_path.display(), e);
        std::io::Error::other(e)
    })?;

    let data_source = DataSource::new(&config.datasource_path);
    let mut views = ReportsViewService::new(data_source, &config.fonts_dir);
    if let Some(dir) = &config.temp_dir {
        views = views.with_temp_dir(dir);
    }
    let remote = RemoteServices::from_config(&config);
    let messages = MessageService::english();

    info!(
        "Server running at http://{}:{} (reference data at {})",
        config.host, config.port, config.referencedata_url
    );

    let bind = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(database.clone()))
            .app_data(web::Data::new(views.clone()))
            .app_data(web::Data::new(remote.clone()))
            .app_data(web::Data::new(messages.clone()))
            .service(services::settings::configure_routes())
            .service(services::templates::configure_routes())
            .service(services::requisitions::configure_routes())
            .service(services::periods::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
