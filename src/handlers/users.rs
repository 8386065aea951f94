// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for account administration
// PURPOSE: Staff browse accounts, owners edit their own profile

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::TravelError;
use crate::models::{UpdateUserRequest, UserListQuery, UserListResponse};
use crate::services::AuthService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// GET /users (staff only)
pub async fn list_users(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    query: web::Query<UserListQuery>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_staff()?;

    let (users, total_count) = UserRepository::list(pool.get_ref(), &query).await?;

    let limit = query.limit.unwrap_or(20).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let has_more = total_count > (page * limit);

    Ok(HttpResponse::Ok().json(UserListResponse {
        data: users.iter().map(|u| u.to_response()).collect(),
        total_count,
        page,
        limit,
        has_more,
    }))
}

/// GET /users/{id}
/// Owner or staff
pub async fn get_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    let id = path.into_inner();
    auth.can_access_user(id)?;

    let user = UserRepository::get_by_id(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// PUT /users/{id}
/// Owners edit their profile, role and active changes are admin only
pub async fn update_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    let id = path.into_inner();
    auth.can_access_user(id)?;

    // Privilege fields need an admin token
    if req.role.is_some() || req.is_active.is_some() {
        auth.require_admin()?;
    }

    // Roles outside the ladder would silently downgrade to "user" at
    // auth time, refuse them here instead
    if let Some(role) = &req.role {
        if !matches!(role.as_str(), "user" | "editor" | "admin") {
            return Err(TravelError::InvalidInput(format!(
                "Unknown role '{}'",
                role
            )));
        }
    }

    let user = UserRepository::update_user(pool.get_ref(), id, &req).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// DELETE /users/{id}
/// Deactivate an account (admin only)
pub async fn delete_user(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let auth = AuthService::authenticate(&http, config.get_ref())?;
    auth.require_admin()?;

    let id = path.into_inner();
    if id == auth.id {
        return Err(TravelError::InvalidInput(
            "Admins cannot deactivate their own account".to_string(),
        ));
    }

    UserRepository::deactivate(pool.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for user routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
