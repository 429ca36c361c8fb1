//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, ItemsAndPagesNumber, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use blogicum_core::domain::{Category, Comment, CommentWithAuthor, Location, PostDetail, User};
use blogicum_core::error::RepoError;
use blogicum_core::feed::{FEED_PAGE_SIZE, FeedItem, FeedScope};
use blogicum_core::pagination::{Page, resolve_page};
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::Entity as LocationEntity;
use super::entity::post::Entity as PostEntity;
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};
use super::queries::{self, FeedRow};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_detail(&self, id: Uuid) -> Result<Option<PostDetail>, RepoError> {
        let Some(post_model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let author = post_model
            .find_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| RepoError::Query(format!("post {} has no author row", post_model.id)))?;

        let category = if post_model.category_id.is_some() {
            post_model
                .find_related(CategoryEntity)
                .one(&self.db)
                .await
                .map_err(map_db_err)?
        } else {
            None
        };

        let location = if post_model.location_id.is_some() {
            post_model
                .find_related(LocationEntity)
                .one(&self.db)
                .await
                .map_err(map_db_err)?
        } else {
            None
        };

        Ok(Some(PostDetail {
            post: post_model.into(),
            author: author.into(),
            category: category.map(Into::into),
            location: location.map(Into::into),
        }))
    }

    async fn feed_page(
        &self,
        scope: FeedScope,
        now: DateTime<Utc>,
        page: Option<i64>,
    ) -> Result<Page<FeedItem>, RepoError> {
        let paginator = queries::scoped_feed(scope, now)
            .into_model::<FeedRow>()
            .paginate(&self.db, FEED_PAGE_SIZE);

        let ItemsAndPagesNumber {
            number_of_items,
            number_of_pages,
        } = paginator.num_items_and_pages().await.map_err(map_db_err)?;

        let number = resolve_page(page, number_of_pages);

        // Paginator pages are zero-based; the resolved page is one-based.
        let rows = paginator.fetch_page(number - 1).await.map_err(map_db_err)?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            number,
            size: FEED_PAGE_SIZE,
            total_items: number_of_items,
            total_pages: number_of_pages.max(1),
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_in_post(
        &self,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(comment_id)
            .filter(comment::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|(model, author)| {
                let author = author.ok_or_else(|| {
                    RepoError::Query(format!("comment {} has no author row", model.id))
                })?;

                Ok(CommentWithAuthor {
                    comment: model.into(),
                    author_username: author.username,
                })
            })
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .filter(category::Column::IsPublished.eq(true))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, RepoError> {
        let result = LocationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
