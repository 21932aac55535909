use actix_web::{cookie::{Cookie, SameSite}, web, HttpResponse, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::auth::Identity;
use crate::error::AppError;
use crate::AppState;
use tracing::{info, error};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

pub async fn register(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for user: {}", req.username);

    match state.auth_service.register(&req.username, &req.password).await {
        Ok(()) => {
            info!("Registration successful for user: {}", req.username);
            Ok(HttpResponse::Ok().json(MessageResponse {
                message: "User successfully registered. You can now login.".into(),
            }))
        }
        Err(e) => {
            error!("Registration failed for user: {}: {}", req.username, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for user: {}", req.username);

    let session = match state.auth_service.login(&req.username, &req.password).await {
        Ok(session) => session,
        Err(e) => {
            error!("Login failed for user: {}: {}", req.username, e);
            return Err(e);
        }
    };

    let lifetime = session.expires_at - session.issued_at;
    let cookie = Cookie::build(state.config.session.cookie_name.clone(), session.session_id.clone())
        .path("/customer")
        .http_only(true)
        .secure(state.config.session.secure)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::seconds(lifetime.num_seconds()))
        .finish();

    info!("Login successful for user: {}", session.username);
    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        message: "Login successful.".into(),
        access_token: session.token,
    }))
}

pub async fn logout(
    req: HttpRequest,
    identity: web::ReqData<Identity>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cookie_name = state.config.session.cookie_name.clone();

    if let Some(cookie) = req.cookie(&cookie_name) {
        state.auth_service.logout(cookie.value()).await;
    }
    info!("User {} logged out", identity.username);

    let mut removal = Cookie::build(cookie_name, "").path("/customer").finish();
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(MessageResponse {
        message: "Successfully logged out".into(),
    }))
}
