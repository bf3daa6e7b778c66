use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    http::{header, Method},
    middleware::Next,
    web, Error,
};
use tracing::warn;

use crate::config::AppConfig;

fn is_public(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS || req.path() == "/health" || req.path() == "/"
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Bearer-key guard for the web API, installed with
/// `middleware::from_fn(require_api_key)`. A no-op while `server.api_keys`
/// is empty.
pub async fn require_api_key(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if !is_public(&req) {
        let config = req.app_data::<web::Data<AppConfig>>().ok_or_else(|| {
            warn!("AppConfig missing in app_data");
            ErrorInternalServerError("Configuration error")
        })?;

        let keys = &config.server.api_keys;
        let authorized = keys.is_empty()
            || bearer_token(&req).is_some_and(|token| keys.iter().any(|key| key == token));

        if !authorized {
            warn!("Rejected unauthenticated request to {}", req.path());
            return Err(ErrorUnauthorized("Invalid or missing API key"));
        }
    }

    next.call(req).await
}
