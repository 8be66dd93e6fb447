//! The post registry.

use std::sync::RwLock;

use chrono::Utc;

use sellerdesk_auth::Principal;
use sellerdesk_core::{DomainError, DomainResult};

use crate::post::{Post, PostCategory, PostDraft, PostId, PostPatch};

/// In-memory registry of board posts, newest first.
///
/// The one `RwLock` gives readers a fully-created post or nothing: a
/// secret post is never observable before its lock code is in place,
/// because validation happens before the write lock is taken.
#[derive(Debug, Default)]
pub struct PostBoard {
    inner: RwLock<Vec<Post>>,
}

impl PostBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and publish a draft. Returns the new post's id.
    pub fn submit(&self, draft: PostDraft) -> DomainResult<PostId> {
        let id = PostId::new();
        let post = draft.into_post(id, Utc::now())?;

        let mut posts = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("post board lock poisoned"))?;
        tracing::info!(post = %id, secret = post.is_secret(), "post published");
        posts.insert(0, post);
        Ok(id)
    }

    pub fn get(&self, id: PostId) -> Option<Post> {
        let posts = self.inner.read().ok()?;
        posts.iter().find(|p| p.id == id).cloned()
    }

    /// All posts, newest first.
    pub fn list(&self) -> Vec<Post> {
        match self.inner.read() {
            Ok(posts) => posts.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn list_by_category(&self, category: PostCategory) -> Vec<Post> {
        match self.inner.read() {
            Ok(posts) => posts.iter().filter(|p| p.category == category).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Count a detail-view open. Returns the new view count.
    pub fn record_view(&self, id: PostId) -> DomainResult<u64> {
        let mut posts = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("post board lock poisoned"))?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;
        post.views += 1;
        Ok(post.views)
    }

    /// Moderation edit. Staff only; secrecy and ownership cannot change.
    pub fn update(&self, actor: &Principal, id: PostId, patch: PostPatch) -> DomainResult<()> {
        if !actor.is_admin() {
            return Err(DomainError::Unauthorized);
        }
        let mut posts = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("post board lock poisoned"))?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(DomainError::validation("post title cannot be empty"));
            }
            post.title = title;
        }
        if let Some(body) = patch.body {
            if body.trim().is_empty() {
                return Err(DomainError::validation("post body cannot be empty"));
            }
            post.body = body.trim().to_string();
        }
        if let Some(category) = patch.category {
            post.category = category;
        }
        Ok(())
    }

    /// Moderation removal. Staff only.
    pub fn delete(&self, actor: &Principal, id: PostId) -> DomainResult<()> {
        if !actor.is_admin() {
            return Err(DomainError::Unauthorized);
        }
        let mut posts = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("post board lock poisoned"))?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(DomainError::NotFound);
        }
        tracing::info!(post = %id, moderator = %actor.identity(), "post removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sellerdesk_auth::Role;
    use sellerdesk_core::Identity;

    fn draft(title: &str, category: PostCategory) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            body: "body".to_string(),
            author_name: "Author".to_string(),
            author_identity: None,
            category,
            secret: false,
            password: None,
        }
    }

    fn staff() -> Principal {
        Principal::new(Identity::parse("mgr@staff.io").unwrap(), "Manager", Role::Manager)
    }

    fn member() -> Principal {
        Principal::new(Identity::parse("u@x.io").unwrap(), "U", Role::Seller)
    }

    #[test]
    fn list_is_newest_first() {
        let board = PostBoard::new();
        board.submit(draft("first", PostCategory::Free)).unwrap();
        board.submit(draft("second", PostCategory::Free)).unwrap();

        let titles: Vec<_> = board.list().iter().map(|p| p.title.clone()).collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[test]
    fn category_filter() {
        let board = PostBoard::new();
        board.submit(draft("rules", PostCategory::Notice)).unwrap();
        board.submit(draft("chat", PostCategory::Free)).unwrap();

        let notices = board.list_by_category(PostCategory::Notice);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "rules");
    }

    #[test]
    fn views_increment_monotonically() {
        let board = PostBoard::new();
        let id = board.submit(draft("t", PostCategory::Free)).unwrap();

        assert_eq!(board.record_view(id).unwrap(), 1);
        assert_eq!(board.record_view(id).unwrap(), 2);
        assert_eq!(board.get(id).unwrap().views, 2);
    }

    #[test]
    fn update_requires_staff_and_keeps_secrecy() {
        let board = PostBoard::new();
        let id = board.submit(draft("t", PostCategory::Free)).unwrap();

        let patch = PostPatch {
            title: Some("edited".to_string()),
            ..Default::default()
        };
        assert_eq!(
            board.update(&member(), id, patch.clone()),
            Err(DomainError::Unauthorized)
        );

        board.update(&staff(), id, patch).unwrap();
        let post = board.get(id).unwrap();
        assert_eq!(post.title, "edited");
        assert!(!post.is_secret());
    }

    #[test]
    fn delete_requires_staff() {
        let board = PostBoard::new();
        let id = board.submit(draft("t", PostCategory::Free)).unwrap();

        assert_eq!(board.delete(&member(), id), Err(DomainError::Unauthorized));
        board.delete(&staff(), id).unwrap();
        assert!(board.get(id).is_none());
        assert_eq!(board.delete(&staff(), id), Err(DomainError::NotFound));
    }

    #[test]
    fn missing_post_is_not_found() {
        let board = PostBoard::new();
        assert_eq!(board.record_view(PostId::new()), Err(DomainError::NotFound));
    }
}
