use actix_web::{HttpResponse, http, web};

use crate::errors::app_error::AppError;
use crate::state::app_state::AppState;
use crate::structs::url_request::{ShortenRequest, ShortenResponse};

/// Create a short URL, or return the one already stored for this full URL
pub async fn shorten_url(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<ShortenRequest>,
) -> Result<HttpResponse, AppError> {
    req.check().map_err(AppError::validation)?;

    let links = &app_state.links;
    let link = links
        .shorten(req.full_url.as_deref(), req.expiry_time)
        .await?;
    let short_url = links.short_url(&link.short_code);

    Ok(HttpResponse::Ok().json(ShortenResponse::from_link(link, short_url)))
}

/// Redirect to original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let short_code = path.into_inner();
    let target = app_state.links.resolve(&short_code).await?;

    Ok(HttpResponse::Found()
        .append_header((http::header::LOCATION, target))
        .finish())
}
