//! Post handlers: home feed, detail page, and the post lifecycle.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::access::{can_modify, can_view};
use blogicum_core::domain::{CommentWithAuthor, Post, PostDetail};
use blogicum_core::feed::FeedScope;
use blogicum_shared::dto::{
    CategoryRef, CommentResponse, PostDetailResponse, PostInput, PostResponse,
};

use crate::handlers::{FeedQuery, page_response, paths, see_other};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Longest accepted post title; matches the column width.
const MAX_TITLE_LEN: usize = 256;

/// Check the editable post fields. A referenced category or location
/// row must exist.
async fn validate_post_input(state: &AppState, input: &PostInput) -> AppResult<()> {
    let mut errors = Vec::new();

    if input.title.trim().is_empty() || input.title.len() > MAX_TITLE_LEN {
        errors.push(format!("Title must be 1 to {MAX_TITLE_LEN} characters"));
    }
    if input.text.trim().is_empty() {
        errors.push("Text must not be empty".to_string());
    }
    if let Some(category_id) = input.category_id {
        if state.categories.find_by_id(category_id).await?.is_none() {
            errors.push("Unknown category".to_string());
        }
    }
    if let Some(location_id) = input.location_id {
        if state.locations.find_by_id(location_id).await?.is_none() {
            errors.push("Unknown location".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn comment_response(c: CommentWithAuthor) -> CommentResponse {
    CommentResponse {
        id: c.comment.id,
        post_id: c.comment.post_id,
        text: c.comment.text,
        author: c.author_username,
        created_at: c.comment.created_at,
    }
}

fn detail_response(detail: PostDetail, comments: Vec<CommentWithAuthor>) -> PostDetailResponse {
    let comments: Vec<CommentResponse> = comments.into_iter().map(comment_response).collect();

    PostDetailResponse {
        post: PostResponse {
            id: detail.post.id,
            title: detail.post.title,
            text: detail.post.text,
            image: detail.post.image,
            pub_date: detail.post.pub_date,
            author: detail.author.username,
            category: detail.category.map(|c| CategoryRef {
                title: c.title,
                slug: c.slug,
            }),
            location: detail.location.map(|l| l.name),
            is_published: detail.post.is_published,
            created_at: detail.post.created_at,
            comment_count: comments.len() as u64,
        },
        comments,
    }
}

/// The edit form's view of a post.
fn post_input(post: Post) -> PostInput {
    PostInput {
        title: post.title,
        text: post.text,
        image: post.image,
        pub_date: post.pub_date,
        location_id: post.location_id,
        category_id: post.category_id,
    }
}

/// GET /api/posts - all effectively public posts, newest first.
pub async fn home_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .feed_page(FeedScope::Home, state.clock.now(), query.requested_page())
        .await?;

    Ok(HttpResponse::Ok().json(page_response(page)))
}

/// GET /api/posts/{post_id}
///
/// A post the viewer may not see is served exactly like a missing one.
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let Some(detail) = state.posts.find_detail(post_id).await? else {
        return Err(AppError::NotFound);
    };

    let viewer_id = viewer.0.map(|i| i.user_id);
    if !can_view(
        viewer_id,
        &detail.post,
        detail.category.as_ref(),
        state.clock.now(),
    ) {
        return Err(AppError::NotFound);
    }

    let comments = state.comments.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(detail_response(detail, comments)))
}

/// POST /api/posts
///
/// The author is bound from the authenticated identity; the payload
/// carries no author field and any unknown field is discarded.
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    validate_post_input(&state, &input).await?;

    let mut post = Post::new(identity.user_id, input.title, input.text, input.pub_date);
    post.image = input.image;
    post.location_id = input.location_id;
    post.category_id = input.category_id;
    let post = state.posts.insert(post).await?;

    tracing::debug!(post_id = %post.id, author = %identity.username, "Post created");

    Ok(see_other(&paths::profile_feed(&identity.username)))
}

/// GET /api/posts/{post_id}/edit - the edit form, prefilled.
pub async fn edit_post_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let Some(post) = state.posts.find_by_id(post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &post) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    Ok(HttpResponse::Ok().json(post_input(post)))
}

/// POST /api/posts/{post_id}/edit
///
/// A non-author is sent to the detail page and the post is untouched.
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let Some(mut post) = state.posts.find_by_id(post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &post) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    let input = body.into_inner();
    validate_post_input(&state, &input).await?;

    post.title = input.title;
    post.text = input.text;
    post.image = input.image;
    post.pub_date = input.pub_date;
    post.location_id = input.location_id;
    post.category_id = input.category_id;
    state.posts.update(post).await?;

    Ok(see_other(&paths::post_detail(post_id)))
}

/// GET /api/posts/{post_id}/delete - confirmation step, no state change.
pub async fn delete_post_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let Some(post) = state.posts.find_by_id(post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &post) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    Ok(HttpResponse::Ok().json(post_input(post)))
}

/// POST /api/posts/{post_id}/delete
///
/// The store cascades the post's comments away with it.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let Some(post) = state.posts.find_by_id(post_id).await? else {
        return Err(AppError::NotFound);
    };
    if !can_modify(identity.user_id, &post) {
        return Ok(see_other(&paths::post_detail(post_id)));
    }

    state.posts.delete(post.id).await?;

    tracing::debug!(post_id = %post_id, author = %identity.username, "Post deleted");

    Ok(see_other(&paths::profile_feed(&identity.username)))
}
