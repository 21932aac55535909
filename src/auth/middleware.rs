use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    middleware::Next,
    web, HttpMessage, ResponseError,
};
use tracing::warn;

use crate::auth::Identity;
use crate::error::AppError;
use crate::AppState;

/// Gate for the `/customer/auth` scope.
///
/// Looks for the session cookie first, then an `Authorization: Bearer` header.
/// No credential at all is a 401; one that fails verification is a 403. On
/// success the caller's [`Identity`] is stored in the request extensions for
/// handlers to take as `web::ReqData<Identity>`.
pub async fn session_gate<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
    match identify(&req).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Err(e) => {
            warn!("Rejected {} {}: {}", req.method(), req.path(), e);
            let response = e.error_response();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}

async fn identify(req: &ServiceRequest) -> Result<Identity, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("Application state not available".into()))?;

    let session_id = req
        .cookie(&state.config.session.cookie_name)
        .map(|c| c.value().to_string());

    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    state
        .auth_service
        .authorize(session_id.as_deref(), bearer.as_deref())
        .await
}
