use actix_web::{HttpRequest, error::JsonPayloadError, web};

use crate::errors::app_error::{AppError, FULL_URL_REQUIRED};
use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{redirect_to_url, shorten_url};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.route("/shorten", web::post().to(shorten_url));
    cfg.route("/api/health/check", web::get().to(health_check));
    // Catch-all for short codes, keep it last
    cfg.route("/{short_code}", web::get().to(redirect_to_url));
}

/// A request without a JSON body is treated like an empty object.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => FULL_URL_REQUIRED,
        JsonPayloadError::Deserialize(e) if e.is_eof() => FULL_URL_REQUIRED,
        _ => "Invalid request body",
    };
    AppError::validation(message).into()
}
