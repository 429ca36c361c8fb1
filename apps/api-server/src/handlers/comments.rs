//! Comment handlers, all scoped under the parent post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::access::{can_modify, can_view};
use blogicum_core::domain::{Comment, PostDetail};
use blogicum_shared::dto::{CommentInput, CommentResponse};

use crate::handlers::{paths, see_other};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Resolve the parent post of a comment operation. A parent the actor
/// may not view is served as absent, so comment routes never betray a
/// hidden post.
async fn viewable_parent(state: &AppState, actor: Uuid, post_id: Uuid) -> AppResult<PostDetail> {
    let Some(detail) = state.posts.find_detail(post_id).await? else {
        return Err(AppError::NotFound);
    };

    if !can_view(
        Some(actor),
        &detail.post,
        detail.category.as_ref(),
        state.clock.now(),
    ) {
        return Err(AppError::NotFound);
    }

    Ok(detail)
}

fn validate_comment_input(input: &CommentInput) -> AppResult<()> {
    if input.text.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "Text must not be empty".to_string(),
        ]));
    }
    Ok(())
}

/// POST /api/posts/{post_id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentInput>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let detail = viewable_parent(&state, identity.user_id, post_id).await?;

    let input = body.into_inner();
    validate_comment_input(&input)?;

    let comment = Comment::new(detail.post.id, identity.user_id, input.text);
    state.comments.insert(comment).await?;

    Ok(see_other(&paths::post_detail(post_id)))
}

/// GET /api/posts/{post_id}/comments/{comment_id}/edit - the edit form,
/// prefilled.
pub async fn edit_comment_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    viewable_parent(&state, identity.user_id, post_id).await?;

    let Some(comment) = state.comments.find_in_post(comment_id, post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &comment) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    Ok(HttpResponse::Ok().json(CommentInput { text: comment.text }))
}

/// POST /api/posts/{post_id}/comments/{comment_id}/edit
pub async fn update_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentInput>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    viewable_parent(&state, identity.user_id, post_id).await?;

    let Some(mut comment) = state.comments.find_in_post(comment_id, post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &comment) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    let input = body.into_inner();
    validate_comment_input(&input)?;

    comment.text = input.text;
    state.comments.update(comment).await?;

    Ok(see_other(&paths::post_detail(post_id)))
}

/// GET /api/posts/{post_id}/comments/{comment_id}/delete - confirmation
/// step, no state change.
pub async fn delete_comment_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    viewable_parent(&state, identity.user_id, post_id).await?;

    let Some(comment) = state.comments.find_in_post(comment_id, post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &comment) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    // Only the author reaches this point, so the identity names the
    // comment's author.
    Ok(HttpResponse::Ok().json(CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        text: comment.text,
        author: identity.username,
        created_at: comment.created_at,
    }))
}

/// POST /api/posts/{post_id}/comments/{comment_id}/delete
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    viewable_parent(&state, identity.user_id, post_id).await?;

    let Some(comment) = state.comments.find_in_post(comment_id, post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &comment) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    state.comments.delete(comment.id).await?;

    Ok(see_other(&paths::post_detail(post_id)))
}
