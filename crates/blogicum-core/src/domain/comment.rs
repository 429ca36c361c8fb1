use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - attached to a post, owned by its author.
///
/// Comments carry no publication flag of their own: a comment is
/// visible to anyone who can view the parent post. Deleting the post
/// deletes its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            post_id,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// A comment with its author's username resolved, ordered oldest-first
/// under the parent post.
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_username: String,
}
