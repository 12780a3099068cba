use actix_files::{Files, NamedFile};
use actix_web::{web, App, HttpServer};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod store;

use config::Config;
use store::Tables;

async fn index(static_dir: web::Data<PathBuf>) -> io::Result<NamedFile> {
    NamedFile::open(static_dir.join("index.html"))
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let tables = web::Data::new(Tables::open(&config.data_dir)?);
    let static_dir = web::Data::new(config.static_dir.clone());

    tracing::info!(
        host = %config.host,
        port = config.port,
        data_dir = %config.data_dir.display(),
        "serving api and client"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(tables.clone())
            .app_data(static_dir.clone())
            .configure(api::routes)
            .service(Files::new("/pkg", static_dir.join("pkg")))
            .default_service(web::route().to(index))
    })
    .bind(config.bind_address())?
    .run()
    .await
}
