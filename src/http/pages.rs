use crate::config::Config;
use actix_files::NamedFile;
use actix_web::web::Data;
use std::path::Path;
use std::sync::Arc;

pub(crate) async fn index(config: Data<Arc<Config>>) -> actix_web::Result<NamedFile> {
    let path = Path::new(&config.static_directory).join("index.html");

    Ok(NamedFile::open_async(path).await?)
}

pub(crate) async fn favicon(config: Data<Arc<Config>>) -> actix_web::Result<NamedFile> {
    let path = Path::new(&config.static_directory).join("favicon.ico");

    Ok(NamedFile::open_async(path).await?)
}
