use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, CommentWithAuthor, Location, Post, PostDetail, User};
use crate::error::RepoError;
use crate::feed::{FeedItem, FeedScope};
use crate::pagination::Page;

/// Generic repository trait defining standard CRUD operations.
///
/// Create and edit are distinct transitions in the entity lifecycle, so
/// `insert` and `update` are separate operations rather than one upsert.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Cascades are the store's business.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with identity lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by username (the login and profile-routing key).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository: CRUD plus the read shapes the listing and detail
/// pages need.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// The post with author, category, and location resolved.
    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError>;

    /// One page of a feed: the scope's filter, `pub_date` descending
    /// order, a per-post comment count, and clamped pagination at the
    /// fixed page size.
    async fn feed_page(
        &self,
        scope: FeedScope,
        now: DateTime<Utc>,
        page: Option<i64>,
    ) -> Result<Page<FeedItem>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Resolve a comment through its parent post; `None` unless the
    /// (comment, post) pair matches.
    async fn find_in_post(
        &self,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Comment>, RepoError>;

    /// All comments under a post, oldest first, with author usernames.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError>;
}

/// Category lookups. Categories have no write surface in this service.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError>;

    /// Resolve a category listing by slug. Only published categories
    /// resolve: an unpublished slug is a not-found condition, never an
    /// empty feed.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Location lookups. Locations have no write surface in this service.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, RepoError>;
}
