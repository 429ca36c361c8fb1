//! Category listing handler.

use actix_web::{HttpResponse, web};

use blogicum_core::feed::FeedScope;
use blogicum_shared::dto::{CategoryFeedResponse, CategoryResponse};

use crate::handlers::{FeedQuery, page_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories/{slug}/posts
///
/// An unpublished category does not resolve: its slug is served as
/// not-found, never as an empty feed.
pub async fn category_feed(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let Some(category) = state.categories.find_published_by_slug(&slug).await? else {
        return Err(AppError::NotFound);
    };

    let page = state
        .posts
        .feed_page(
            FeedScope::Category(category.id),
            state.clock.now(),
            query.requested_page(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: CategoryResponse {
            title: category.title,
            description: category.description,
            slug: category.slug,
        },
        page: page_response(page),
    }))
}
