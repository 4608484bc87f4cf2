use crate::config::Config;
use crate::impls::{YtDlpFetcher, YtDlpResolver};
use crate::services::download_processor::DownloadProcessor;
use crate::services::{CoverArtService, ThumbnailService};
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures_lite::FutureExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use ytdlp_client::YtDlpClient;

mod config;
mod http;
mod impls;
mod services;
mod types;
mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Arc::from(Config::from_env());

    info!("Starting application...");

    std::fs::create_dir_all(&config.downloads_directory)?;

    let http_client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Unable to initialize HTTP client");
    let ytdlp_client = Arc::new(YtDlpClient::new(
        PathBuf::from(&config.yt_dlp_path),
        PathBuf::from(&config.ffmpeg_path),
        Duration::from_secs(config.extraction_timeout),
    ));

    let download_processor = {
        Arc::new(DownloadProcessor::new(
            Arc::new(YtDlpResolver::new(
                Arc::clone(&ytdlp_client),
                http_client.clone(),
            )),
            Arc::new(YtDlpFetcher::new(Arc::clone(&ytdlp_client))),
            Arc::new(CoverArtService::new(http_client.clone())),
            PathBuf::from(&config.downloads_directory),
        ))
    };
    let thumbnail_service = Arc::new(ThumbnailService::new(http_client.clone()));

    let shutdown_timeout = config.shutdown_timeout.clone();
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        let config = Arc::clone(&config);
        move || {
            App::new()
                .app_data(Data::new(Arc::clone(&download_processor)))
                .app_data(Data::new(Arc::clone(&thumbnail_service)))
                .app_data(Data::new(Arc::clone(&config)))
                .service(web::resource("/download").route(web::post().to(http::download_track)))
                .service(web::resource("/thumbnail").route(web::get().to(http::proxy_thumbnail)))
                .service(web::resource("/").route(web::get().to(http::index)))
                .service(web::resource("/favicon.ico").route(web::get().to(http::favicon)))
                .service(actix_files::Files::new("/static", config.static_directory.clone()))
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;

    Ok(())
}
