use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Location, User};

/// Post entity - a publication authored by a user.
///
/// `pub_date` may lie in the future for scheduled publication; such a
/// post stays invisible to everyone but its author until the date
/// passes. `category_id` and `location_id` are weak references: the
/// store nulls them when the referenced row is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub location_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post bound to its author. Optional attachments
    /// (image, location, category) start empty and are set by the
    /// caller.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            image: None,
            pub_date,
            author_id,
            location_id: None,
            category_id: None,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}

/// A post together with its resolved references, as served by the
/// detail page. Absent category/location mean the post carries no such
/// attachment (or the referenced row was deleted).
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author: User,
    pub category: Option<Category>,
    pub location: Option<Location>,
}
