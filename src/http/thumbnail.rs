use crate::services::ThumbnailService;
use actix_web::web::{Data, Query};
use actix_web::{HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

#[derive(Deserialize)]
pub(crate) struct ThumbnailQuery {
    url: String,
}

pub(crate) async fn proxy_thumbnail(
    thumbnail_service: Data<Arc<ThumbnailService>>,
    query: Query<ThumbnailQuery>,
) -> impl Responder {
    match thumbnail_service.fetch(&query.url).await {
        Ok(image) => HttpResponse::Ok()
            .content_type(image.content_type)
            .body(image.bytes),
        Err(error) => {
            error!(?error, url = query.url, "Unable to proxy thumbnail");
            HttpResponse::BadGateway()
                .content_type("text/plain")
                .body("Unable to fetch thumbnail")
        }
    }
}
