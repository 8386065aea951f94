// src/handlers/auth.rs
// DOCUMENTATION: HTTP handlers for account registration and login
// PURPOSE: Parse requests, call the auth service, return tokens

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::TravelError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::AuthService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// POST /auth/register
/// Create an account and return a bearer token
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<RegisterRequest>,
) -> Result<impl Responder, TravelError> {
    // Validate request
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let (user, token) = AuthService::register(pool.get_ref(), config.get_ref(), &req).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.to_response(),
    }))
}

/// POST /auth/login
/// Exchange credentials for a bearer token
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = req.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let (user, token) = AuthService::login(pool.get_ref(), config.get_ref(), &req).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.to_response(),
    }))
}

/// GET /auth/me
/// Profile of the authenticated account
pub async fn me(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&req, config.get_ref())?;
    let user = UserRepository::get_by_id(pool.get_ref(), auth.id).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// Configuration for auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
