//! Post visibility filter.
//!
//! A post is effectively public iff its own publication flag is set,
//! its category (when it has one) is published, and its publication
//! date is not in the future. The predicate is author-agnostic: the
//! author's own access to hidden posts is the authorization gate's
//! business, not this filter's.

use chrono::{DateTime, Utc};

use crate::domain::{Category, Post};

/// Whether `post` is effectively public at instant `now`.
///
/// `category` is the post's resolved category, `None` when the post has
/// no category attached. An absent category never hides a post; only an
/// attached-but-unpublished one does.
pub fn post_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published && category.is_none_or(|c| c.is_published) && post.pub_date <= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn past_post() -> Post {
        Post::new(
            Uuid::new_v4(),
            "title".into(),
            "text".into(),
            Utc::now() - Duration::hours(1),
        )
    }

    fn published_category() -> Category {
        Category::new("Nature".into(), "Outdoors".into(), "nature".into())
    }

    #[test]
    fn published_past_post_without_category_is_visible() {
        let post = past_post();
        assert!(post_visible(&post, None, Utc::now()));
    }

    #[test]
    fn unpublished_post_is_hidden() {
        let mut post = past_post();
        post.is_published = false;
        assert!(!post_visible(&post, None, Utc::now()));
    }

    #[test]
    fn future_pub_date_hides_post() {
        let mut post = past_post();
        post.pub_date = Utc::now() + Duration::hours(1);
        assert!(!post_visible(&post, None, Utc::now()));
    }

    #[test]
    fn pub_date_equal_to_now_is_visible() {
        let now = Utc::now();
        let mut post = past_post();
        post.pub_date = now;
        assert!(post_visible(&post, None, now));
    }

    #[test]
    fn published_category_keeps_post_visible() {
        let category = published_category();
        let mut post = past_post();
        post.category_id = Some(category.id);
        assert!(post_visible(&post, Some(&category), Utc::now()));
    }

    #[test]
    fn unpublished_category_hides_post() {
        let mut category = published_category();
        category.is_published = false;
        let mut post = past_post();
        post.category_id = Some(category.id);
        assert!(!post_visible(&post, Some(&category), Utc::now()));
    }

    #[test]
    fn visibility_is_relative_to_the_given_instant() {
        let mut post = past_post();
        post.pub_date = Utc::now() + Duration::hours(1);

        assert!(!post_visible(&post, None, Utc::now()));
        assert!(post_visible(&post, None, Utc::now() + Duration::hours(2)));
    }
}
