use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Location entity - an optional geographic tag for posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            is_published: true,
            created_at: Utc::now(),
        }
    }
}
