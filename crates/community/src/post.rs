//! Post model for the community boards.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sellerdesk_core::{DomainError, Identity, LockCode};

// ─────────────────────────────────────────────────────────────────────────────
// Post ID
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for a post.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PostId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::validation(format!("PostId: {e}")))?;
        Ok(Self(uuid))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Category
// ─────────────────────────────────────────────────────────────────────────────

/// Board section a post belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    /// Staff announcements.
    Notice,
    /// Open discussion.
    Free,
    /// Curated seller information.
    Info,
}

// ─────────────────────────────────────────────────────────────────────────────
// Post
// ─────────────────────────────────────────────────────────────────────────────

/// A board post or Q&A thread.
///
/// # Invariants
/// - A post is secret if and only if `lock` is `Some`; a secret post cannot
///   exist without a lock code (enforced when the draft is submitted).
/// - `lock` and `author_identity` are set at creation and never change;
///   moderation may edit title/body/category only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    /// Name shown on the board. Mask before rendering on secret posts.
    pub author_name: String,
    /// Identity behind the post, when it was submitted by a signed-in user.
    /// Anonymous submissions (no session) have none and get no owner bypass.
    pub author_identity: Option<Identity>,
    pub category: PostCategory,
    pub lock: Option<LockCode>,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_secret(&self) -> bool {
        self.lock.is_some()
    }
}

/// Fields a caller supplies when submitting a post, mirroring the write
/// form: free-text fields plus a secret checkbox and a password box.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub author_identity: Option<Identity>,
    pub category: PostCategory,
    pub secret: bool,
    /// Considered only when `secret` is set; ignored entirely otherwise.
    pub password: Option<String>,
}

impl PostDraft {
    /// Validate the draft and build the post.
    ///
    /// A secret draft without a valid four-digit password is a validation
    /// error; a locked post with no code cannot exist.
    pub(crate) fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> Result<Post, DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("post title cannot be empty"));
        }
        if self.body.trim().is_empty() {
            return Err(DomainError::validation("post body cannot be empty"));
        }
        let author_name = self.author_name.trim();
        if author_name.is_empty() {
            return Err(DomainError::validation("author name cannot be empty"));
        }

        let lock = if self.secret {
            let raw = self
                .password
                .as_deref()
                .ok_or_else(|| DomainError::validation("secret post requires a lock code"))?;
            Some(LockCode::parse(raw)?)
        } else {
            None
        };

        Ok(Post {
            id,
            title: title.to_string(),
            body: self.body.trim().to_string(),
            author_name: author_name.to_string(),
            author_identity: self.author_identity,
            category: self.category,
            lock,
            views: 0,
            created_at,
        })
    }
}

/// Moderation edit: the fields staff may change. Secrecy and ownership are
/// deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<PostCategory>,
}
