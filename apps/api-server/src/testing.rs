//! In-memory entity store backing handler tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blogicum_core::domain::{
    Category, Comment, CommentWithAuthor, Location, Post, PostDetail, User,
};
use blogicum_core::error::RepoError;
use blogicum_core::feed::{FEED_PAGE_SIZE, FeedItem, FeedScope};
use blogicum_core::pagination::{Page, resolve_page};
use blogicum_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, FixedClock, LocationRepository,
    PostRepository, UserRepository,
};
use blogicum_core::visibility::post_visible;

use crate::state::AppState;

/// One shared store implementing every repository port, so handler
/// tests see the same relational semantics the live store provides:
/// username joins, comment counts, visibility-scoped feeds, and the
/// comment cascade on post deletion.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    locations: RwLock<HashMap<Uuid, Location>>,
}

impl MemoryStore {
    pub async fn add_user(&self, user: User) -> User {
        self.users.write().await.insert(user.id, user.clone());
        user
    }

    pub async fn add_post(&self, post: Post) -> Post {
        self.posts.write().await.insert(post.id, post.clone());
        post
    }

    pub async fn add_comment(&self, comment: Comment) -> Comment {
        self.comments.write().await.insert(comment.id, comment.clone());
        comment
    }

    pub async fn add_category(&self, category: Category) -> Category {
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());
        category
    }

    pub async fn add_location(&self, location: Location) -> Location {
        self.locations
            .write()
            .await
            .insert(location.id, location.clone());
        location
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        Ok(self.add_user(entity).await)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        Ok(self.add_post(entity).await)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .ok_or(RepoError::NotFound)?;
        // Cascade, as the live store's foreign key does
        self.comments.write().await.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        let Some(post) = self.posts.read().await.get(&id).cloned() else {
            return Ok(None);
        };

        let author = self
            .users
            .read()
            .await
            .get(&post.author_id)
            .cloned()
            .ok_or_else(|| RepoError::Query(format!("post {id} has no author row")))?;
        let category = match post.category_id {
            Some(category_id) => self.categories.read().await.get(&category_id).cloned(),
            None => None,
        };
        let location = match post.location_id {
            Some(location_id) => self.locations.read().await.get(&location_id).cloned(),
            None => None,
        };

        Ok(Some(PostDetail {
            post,
            author,
            category,
            location,
        }))
    }

    async fn feed_page(
        &self,
        scope: FeedScope,
        now: DateTime<Utc>,
        page: Option<i64>,
    ) -> Result<Page<FeedItem>, RepoError> {
        let posts = self.posts.read().await;
        let users = self.users.read().await;
        let categories = self.categories.read().await;
        let locations = self.locations.read().await;
        let comments = self.comments.read().await;

        let visible = |post: &Post| {
            let category = post.category_id.and_then(|id| categories.get(&id));
            post_visible(post, category, now)
        };

        let mut rows: Vec<&Post> = posts
            .values()
            .filter(|post| match scope {
                FeedScope::Home => visible(post),
                FeedScope::Category(category_id) => {
                    post.category_id == Some(category_id) && visible(post)
                }
                FeedScope::Author {
                    author_id,
                    include_hidden,
                } => post.author_id == author_id && (include_hidden || visible(post)),
            })
            .collect();
        rows.sort_by_key(|post| std::cmp::Reverse(post.pub_date));

        let total_items = rows.len() as u64;
        let total_pages = total_items.div_ceil(FEED_PAGE_SIZE).max(1);
        let number = resolve_page(page, total_pages);
        let start = ((number - 1) * FEED_PAGE_SIZE) as usize;

        let items = rows
            .into_iter()
            .skip(start)
            .take(FEED_PAGE_SIZE as usize)
            .map(|post| {
                let category = post.category_id.and_then(|id| categories.get(&id));
                FeedItem {
                    post: post.clone(),
                    author_username: users
                        .get(&post.author_id)
                        .map(|u| u.username.clone())
                        .unwrap_or_default(),
                    category_title: category.map(|c| c.title.clone()),
                    category_slug: category.map(|c| c.slug.clone()),
                    location_name: post
                        .location_id
                        .and_then(|id| locations.get(&id))
                        .map(|l| l.name.clone()),
                    comment_count: comments.values().filter(|c| c.post_id == post.id).count()
                        as u64,
                }
            })
            .collect();

        Ok(Page {
            items,
            number,
            size: FEED_PAGE_SIZE,
            total_items,
            total_pages,
        })
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: Comment) -> Result<Comment, RepoError> {
        Ok(self.add_comment(entity).await)
    }

    async fn update(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        if !comments.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        comments.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.comments
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_in_post(
        &self,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Comment>, RepoError> {
        Ok(self
            .comments
            .read()
            .await
            .get(&comment_id)
            .filter(|c| c.post_id == post_id)
            .cloned())
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let comments = self.comments.read().await;
        let users = self.users.read().await;

        let mut rows: Vec<CommentWithAuthor> = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentWithAuthor {
                comment: c.clone(),
                author_username: users
                    .get(&c.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect();
        rows.sort_by_key(|row| row.comment.created_at);
        Ok(rows)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .find(|c| c.slug == slug && c.is_published)
            .cloned())
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, RepoError> {
        Ok(self.locations.read().await.get(&id).cloned())
    }
}

/// Application state over a fresh store, with the clock pinned to `now`.
pub fn memory_state(now: DateTime<Utc>) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        users: store.clone(),
        posts: store.clone(),
        comments: store.clone(),
        categories: store.clone(),
        locations: store.clone(),
        clock: Arc::new(FixedClock(now)),
    };
    (state, store)
}

pub fn user(username: &str) -> User {
    User::new(
        username.to_string(),
        format!("{username}@example.com"),
        String::new(),
    )
}

pub fn post(author: &User, pub_date: DateTime<Utc>) -> Post {
    Post::new(
        author.id,
        format!("Post by {}", author.username),
        "Some text.".to_string(),
        pub_date,
    )
}
