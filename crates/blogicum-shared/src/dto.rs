//! Data Transfer Objects - request/response types for the API.
//!
//! The `*Input` types mirror the editable field sets of the underlying
//! entities; the GET half of an edit route serves the same type back,
//! prefilled, so clients render forms from it. Author and publication
//! flags are never part of an input: authorship is bound from the
//! authenticated identity and the publication flag is curated
//! out-of-band.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Request to login with username and password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's own account, as served to that user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub joined: DateTime<Utc>,
}

/// Editable profile fields (edit-own-profile form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInput {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Editable post fields (create and edit forms).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    #[serde(default)]
    pub location_id: Option<Uuid>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

/// Editable comment fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub text: String,
}

/// Category reference embedded in post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub title: String,
    pub slug: String,
}

/// A post as listings and the detail page serve it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub author: String,
    pub category: Option<CategoryRef>,
    pub location: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub comment_count: u64,
}

/// A comment under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// The detail page: the post plus its comments, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// The category listing: the resolved category and its page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub title: String,
    pub description: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedResponse {
    pub category: CategoryResponse,
    #[serde(flatten)]
    pub page: PageResponse<PostResponse>,
}

/// The profile listing: the resolved profile and its page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFeedResponse {
    pub profile: ProfileResponse,
    #[serde(flatten)]
    pub page: PageResponse<PostResponse>,
}
