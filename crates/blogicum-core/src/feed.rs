//! Listing scopes for the three paginated feeds.
//!
//! Every feed is the same assembly - visibility filter, `pub_date`
//! descending order, per-post comment count, fixed-size pages - scoped
//! differently: the whole site, one category, or one author. The
//! profile feed is the only place the visibility filter is bypassed,
//! and only when the author views their own profile.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Post;

/// Fixed page size for every listing context.
pub const FEED_PAGE_SIZE: u64 = 10;

/// Which slice of posts a feed serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope {
    /// All effectively public posts.
    Home,
    /// Effectively public posts in one (published) category.
    Category(Uuid),
    /// One author's posts. With `include_hidden` the visibility filter
    /// is skipped entirely and unpublished or future-dated posts appear
    /// too; without it the feed is the public slice of that author.
    Author {
        author_id: Uuid,
        include_hidden: bool,
    },
}

impl FeedScope {
    /// Scope for a profile page: the target sees all of their own
    /// posts, everyone else sees only the effectively public ones.
    pub fn profile(target: Uuid, viewer: Option<Uuid>) -> Self {
        Self::Author {
            author_id: target,
            include_hidden: viewer == Some(target),
        }
    }
}

/// One row of a feed: the post plus the resolved names a listing shows,
/// and the comment count aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub post: Post,
    pub author_username: String,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub location_name: Option<String>,
    pub comment_count: u64,
}
