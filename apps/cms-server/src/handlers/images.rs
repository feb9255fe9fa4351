//! Image field endpoints: upload, typed-in URL, removal.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use bytes::Bytes;
use chrono::Utc;

use pharmacy_core::domain::PLACEHOLDER_IMAGE;
use pharmacy_core::images::{ImageFolder, Removal};
use pharmacy_shared::dto::{ImageRemoveRequest, ImageResponse, ImageUploadParams, ImageUrlRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::StaffSession;
use crate::state::AppState;

/// POST /admin/images?folder=featured&filename=photo.png
///
/// The request body is the raw file.
pub async fn upload(
    req: HttpRequest,
    state: web::Data<AppState>,
    _staff: StaffSession,
    params: web::Query<ImageUploadParams>,
    body: Bytes,
) -> AppResult<HttpResponse> {
    let folder: ImageFolder = params.folder.parse().map_err(AppError::BadRequest)?;
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let url = state
        .images
        .upload(folder, &params.filename, content_type, body, Utc::now())
        .await?;

    Ok(HttpResponse::Created().json(ImageResponse {
        preview: url.clone(),
        url,
    }))
}

/// POST /admin/images/url
///
/// Blank input leaves the field as it was.
pub async fn from_url(
    state: web::Data<AppState>,
    _staff: StaffSession,
    body: web::Json<ImageUrlRequest>,
) -> HttpResponse {
    match state.images.accept_url(&body.url) {
        Some(url) => HttpResponse::Ok().json(ImageResponse {
            preview: url.clone(),
            url,
        }),
        None => HttpResponse::NoContent().finish(),
    }
}

/// POST /admin/images/remove
///
/// The field is always cleared; storage cleanup is best effort.
pub async fn remove(
    state: web::Data<AppState>,
    _staff: StaffSession,
    body: web::Json<ImageRemoveRequest>,
) -> HttpResponse {
    if let Removal::CleanupFailed = state.images.remove(&body.url).await {
        tracing::warn!(url = %body.url, "Image field cleared but object was left in storage");
    }

    HttpResponse::Ok().json(ImageResponse {
        url: String::new(),
        preview: PLACEHOLDER_IMAGE.to_string(),
    })
}

/// GET /storage/v1/object/public/{bucket}/{path}
///
/// Serves images kept in memory when no storage service is configured.
pub async fn serve_local(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (bucket, object) = path.into_inner();
    let not_found = || AppError::NotFound(format!("Object {object} not found"));

    let storage = state.local_storage.as_ref().ok_or_else(not_found)?;
    if bucket != state.images.bucket() {
        return Err(not_found());
    }

    let (body, content_type) = storage.get(&object).await.ok_or_else(not_found)?;

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((header::CACHE_CONTROL, "max-age=3600"))
        .body(body))
}
