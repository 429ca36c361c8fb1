//! Named query shapes over the post store.
//!
//! Two bases exist, mirroring the two ways the application reads posts:
//! `all_posts` (the profile self-view, which bypasses visibility) and
//! `publicly_visible` (everything else). Scope filters and the listing
//! columns are layered on top of either base.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};
use uuid::Uuid;

use blogicum_core::domain::Post;
use blogicum_core::feed::{FeedItem, FeedScope};

use super::entity::{category, comment, location, post, user};

/// Base select for listings: author joined for the username, category
/// and location left-joined for their display names, newest publication
/// date first.
fn feed_base() -> Select<post::Entity> {
    post::Entity::find()
        .join(JoinType::InnerJoin, post::Relation::Author.def())
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .join(JoinType::LeftJoin, post::Relation::Location.def())
        .order_by_desc(post::Column::PubDate)
}

/// Every post, regardless of publication state.
pub fn all_posts() -> Select<post::Entity> {
    feed_base()
}

/// Only posts that are effectively public at `now`: published, with a
/// published category or none at all, and a publication date that has
/// passed.
pub fn publicly_visible(now: DateTime<Utc>) -> Select<post::Entity> {
    feed_base()
        .filter(post::Column::IsPublished.eq(true))
        .filter(post::Column::PubDate.lte(now))
        .filter(
            Condition::any()
                .add(post::Column::CategoryId.is_null())
                .add(category::Column::IsPublished.eq(true)),
        )
}

/// The select a feed pages over: scope filter plus listing columns.
pub fn scoped_feed(scope: FeedScope, now: DateTime<Utc>) -> Select<post::Entity> {
    let base = match scope {
        FeedScope::Home => publicly_visible(now),
        FeedScope::Category(category_id) => {
            publicly_visible(now).filter(post::Column::CategoryId.eq(category_id))
        }
        FeedScope::Author {
            author_id,
            include_hidden,
        } => {
            let base = if include_hidden {
                all_posts()
            } else {
                publicly_visible(now)
            };
            base.filter(post::Column::AuthorId.eq(author_id))
        }
    };
    with_feed_columns(base)
}

/// Attach the listing columns: resolved display names and the per-post
/// comment count. Every comment counts; comments have no visibility
/// gate of their own.
fn with_feed_columns(select: Select<post::Entity>) -> Select<post::Entity> {
    select
        .join(JoinType::LeftJoin, post::Relation::Comments.def())
        .column_as(user::Column::Username, "author_username")
        .column_as(category::Column::Title, "category_title")
        .column_as(category::Column::Slug, "category_slug")
        .column_as(location::Column::Name, "location_name")
        .column_as(comment::Column::Id.count(), "comment_count")
        .group_by(post::Column::Id)
        .group_by(user::Column::Id)
        .group_by(category::Column::Id)
        .group_by(location::Column::Id)
}

/// Flat row produced by [`scoped_feed`].
#[derive(Debug, FromQueryResult)]
pub struct FeedRow {
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
    pub author_username: String,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub location_name: Option<String>,
    pub comment_count: i64,
}

impl From<FeedRow> for FeedItem {
    fn from(row: FeedRow) -> Self {
        Self {
            post: Post {
                id: row.id,
                title: row.title,
                text: row.text,
                image: row.image,
                pub_date: row.pub_date,
                author_id: row.author_id,
                location_id: row.location_id,
                category_id: row.category_id,
                is_published: row.is_published,
                created_at: row.created_at,
            },
            author_username: row.author_username,
            category_title: row.category_title,
            category_slug: row.category_slug,
            location_name: row.location_name,
            comment_count: row.comment_count as u64,
        }
    }
}
