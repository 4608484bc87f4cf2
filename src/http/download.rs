use crate::services::download_processor::{DownloadProcessor, DownloadRequest};
use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

pub(crate) async fn download_track(
    processor: Data<Arc<DownloadProcessor>>,
    request: Json<DownloadRequest>,
) -> impl Responder {
    match processor.process(&request).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) if error.is_client_error() => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error.to_string()))
        }
        Err(error) => {
            error!(?error, url = request.url, "Download request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(error.to_string()))
        }
    }
}
