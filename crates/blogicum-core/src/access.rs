//! Ownership-based authorization gate.
//!
//! Two rules cover the whole service: anyone may view an effectively
//! public post (plus authors may always view their own), and only the
//! author may mutate a post or comment. There are no role-based
//! overrides.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, Post};
use crate::visibility::post_visible;

/// An entity owned by the user bound as its author at creation time.
pub trait Authored {
    fn author_id(&self) -> Uuid;
}

impl Authored for Post {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

impl Authored for Comment {
    fn author_id(&self) -> Uuid {
        self.author_id
    }
}

/// Whether `viewer` may see `post` at instant `now`: the post is
/// effectively public, or the viewer is its author. `None` is an
/// anonymous viewer.
pub fn can_view(
    viewer: Option<Uuid>,
    post: &Post,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> bool {
    post_visible(post, category, now) || viewer == Some(post.author_id)
}

/// Whether `actor` may edit or delete `entity`. Identical for posts and
/// comments: only the author may.
pub fn can_modify<E: Authored>(actor: Uuid, entity: &E) -> bool {
    entity.author_id() == actor
}
