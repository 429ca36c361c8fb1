//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use blogicum_core::domain::User;
use blogicum_core::ports::{PasswordService, TokenService};
use blogicum_shared::dto::{AccountResponse, AuthResponse, LoginRequest, RegisterRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Longest accepted username; matches the column width.
pub(crate) const MAX_USERNAME_LEN: usize = 150;

fn validate_registration(req: &RegisterRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if req.username.is_empty() || req.username.len() > MAX_USERNAME_LEN {
        errors.push(format!(
            "Username must be 1 to {MAX_USERNAME_LEN} characters"
        ));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        errors.push("Invalid email address".to_string());
    }
    if req.password.len() < 8 {
        errors.push("Password must be at least 8 characters".to_string());
    }
    errors
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let errors = validate_registration(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Check if the username is already taken
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user
    let mut user = User::new(req.username, req.email, password_hash);
    user.first_name = req.first_name;
    user.last_name = req.last_name;
    let saved_user = state.users.insert(user).await?;

    tracing::info!(username = %saved_user.username, "User registered");

    // Generate token
    let token = token_service
        .generate_token(saved_user.id, &saved_user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by username
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    // Generate token
    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        created_at: user.created_at,
    }))
}
