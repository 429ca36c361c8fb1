//! Profile listing and own-profile handlers.

use actix_web::{HttpResponse, web};

use blogicum_core::feed::FeedScope;
use blogicum_shared::dto::{ProfileFeedResponse, ProfileInput, ProfileResponse};

use crate::handlers::auth::MAX_USERNAME_LEN;
use crate::handlers::{FeedQuery, page_response, paths, see_other};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn validate_profile(input: &ProfileInput) -> Vec<String> {
    let mut errors = Vec::new();
    if input.username.is_empty() || input.username.len() > MAX_USERNAME_LEN {
        errors.push(format!(
            "Username must be 1 to {MAX_USERNAME_LEN} characters"
        ));
    }
    if input.email.is_empty() || !input.email.contains('@') {
        errors.push("Invalid email address".to_string());
    }
    errors
}

/// GET /api/profiles/{username}/posts
///
/// Viewing your own profile lifts the visibility filter: the feed then
/// carries unpublished and future-dated posts too. Anyone else gets the
/// public slice.
pub async fn profile_feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FeedQuery>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let Some(target) = state.users.find_by_username(&username).await? else {
        return Err(AppError::NotFound);
    };

    let scope = FeedScope::profile(target.id, viewer.0.map(|i| i.user_id));
    let page = state
        .posts
        .feed_page(scope, state.clock.now(), query.requested_page())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: ProfileResponse {
            username: target.username,
            first_name: target.first_name,
            last_name: target.last_name,
            joined: target.created_at,
        },
        page: page_response(page),
    }))
}

/// GET /api/profile - the edit-own-profile form, prefilled.
pub async fn own_profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let Some(user) = state.users.find_by_id(identity.user_id).await? else {
        return Err(AppError::NotFound);
    };

    Ok(HttpResponse::Ok().json(ProfileInput {
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
    }))
}

/// POST /api/profile
///
/// Renaming moves the profile feed to the new username; the redirect
/// target already uses it.
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();

    let errors = validate_profile(&input);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let Some(mut user) = state.users.find_by_id(identity.user_id).await? else {
        return Err(AppError::NotFound);
    };

    if input.username != user.username
        && state.users.find_by_username(&input.username).await?.is_some()
    {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    user.username = input.username;
    user.email = input.email;
    user.first_name = input.first_name;
    user.last_name = input.last_name;
    user.updated_at = state.clock.now();
    let user = state.users.update(user).await?;

    Ok(see_other(&paths::profile_feed(&user.username)))
}
