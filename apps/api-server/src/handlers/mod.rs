//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod posts;
mod profiles;


use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;

use blogicum_core::feed::FeedItem;
use blogicum_core::pagination::Page;
use blogicum_shared::dto::{CategoryRef, PageResponse, PostResponse};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // An id that does not parse is served exactly like an id that does
    // not exist.
    cfg.app_data(web::PathConfig::default().error_handler(|_, _| AppError::NotFound.into()));

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Posts and their comments
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::home_feed))
                    .route("", web::post().to(posts::create_post))
                    .route("/{post_id}", web::get().to(posts::post_detail))
                    .route("/{post_id}/edit", web::get().to(posts::edit_post_form))
                    .route("/{post_id}/edit", web::post().to(posts::update_post))
                    .route("/{post_id}/delete", web::get().to(posts::delete_post_form))
                    .route("/{post_id}/delete", web::post().to(posts::delete_post))
                    .route("/{post_id}/comments", web::post().to(comments::add_comment))
                    .route(
                        "/{post_id}/comments/{comment_id}/edit",
                        web::get().to(comments::edit_comment_form),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}/edit",
                        web::post().to(comments::update_comment),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}/delete",
                        web::get().to(comments::delete_comment_form),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}/delete",
                        web::post().to(comments::delete_comment),
                    ),
            )
            // Listings by category and author
            .route(
                "/categories/{slug}/posts",
                web::get().to(categories::category_feed),
            )
            .route(
                "/profiles/{username}/posts",
                web::get().to(profiles::profile_feed),
            )
            // Own account
            .route("/profile", web::get().to(profiles::own_profile))
            .route("/profile", web::post().to(profiles::update_profile)),
    );
}

/// Canonical resource paths, used for redirects.
pub(crate) mod paths {
    use uuid::Uuid;

    pub fn login() -> String {
        "/api/auth/login".to_string()
    }

    pub fn post_detail(post_id: Uuid) -> String {
        format!("/api/posts/{post_id}")
    }

    pub fn profile_feed(username: &str) -> String {
        format!("/api/profiles/{username}/posts")
    }
}

/// 303 See Other to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Query parameters accepted by listing routes.
#[derive(Debug, Deserialize)]
pub(crate) struct FeedQuery {
    pub page: Option<String>,
}

impl FeedQuery {
    /// The requested page number, `None` when absent or not an integer.
    /// Whatever comes in, the resolved page is a valid one.
    pub fn requested_page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.parse().ok())
    }
}

/// Map one feed row into its response shape.
pub(crate) fn feed_item_response(item: FeedItem) -> PostResponse {
    PostResponse {
        id: item.post.id,
        title: item.post.title,
        text: item.post.text,
        image: item.post.image,
        pub_date: item.post.pub_date,
        author: item.author_username,
        category: match (item.category_title, item.category_slug) {
            (Some(title), Some(slug)) => Some(CategoryRef { title, slug }),
            _ => None,
        },
        location: item.location_name,
        is_published: item.post.is_published,
        created_at: item.post.created_at,
        comment_count: item.comment_count,
    }
}

/// Wrap a feed page in the listing envelope.
pub(crate) fn page_response(page: Page<FeedItem>) -> PageResponse<PostResponse> {
    let page = page.map(feed_item_response);
    PageResponse {
        items: page.items,
        page: page.number,
        page_size: page.size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}
