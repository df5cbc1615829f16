//! Route table.
//!
//! [`configure`] registers every `(method, path) -> handler` pair in one
//! place, together with the extractor configuration that routes malformed
//! input to the 422 validation body. Unknown paths fall through to
//! [`not_found`].

use actix_web::web;

use crate::domain::Error;
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::health::{health, live, ready, root};
use crate::inbound::http::users::{
    UNSIGNED_QUERY_FIELDS, create_user, delete_user, get_user, list_users, update_user,
};
use crate::inbound::http::validation::{
    json_error_handler, path_error_handler, query_error_handler,
};

/// Message attached to the 404 envelope for unknown paths.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "请求的资源不存在 (not found)";

/// Register the API routes and extractor error handlers on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use starter::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(
            web::QueryConfig::default().error_handler(query_error_handler(UNSIGNED_QUERY_FIELDS)),
        )
        .route("/", web::get().to(root))
        .route("/health/live", web::get().to(live))
        .route("/health/ready", web::get().to(ready))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health))
                .service(
                    web::resource("/users")
                        .route(web::get().to(list_users))
                        .route(web::post().to(create_user)),
                )
                .service(
                    web::resource("/users/{user_id}")
                        .route(web::get().to(get_user))
                        .route(web::put().to(update_user))
                        .route(web::delete().to(delete_user)),
                ),
        );
}

/// Fallback handler answering unknown paths with the 404 envelope.
pub async fn not_found() -> ApiResult<Envelope<()>> {
    Err(ApiError::from(Error::not_found(ROUTE_NOT_FOUND_MESSAGE)))
}
