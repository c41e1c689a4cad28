//! Post use-case facade.
//!
//! # Responsibility
//! - Delegate CRUD and lifecycle calls to exactly one backend.
//! - Provide publish/unpublish convenience operations.
//! - Keep excerpt derivation and date formatting as explicit, pure
//!   post-processing steps outside the storage layer.
//!
//! # Invariants
//! - The facade owns no state and performs no storage logic of its own.
//! - Derived excerpts are never written back to the store.

use crate::model::post::{Post, PostDraft, PostPatch};
use crate::repo::post_repo::{PostListQuery, PostRepository, RepoResult};
use chrono::{DateTime, Utc};

/// Longest derived excerpt, in characters, before truncation applies.
const EXCERPT_MAX_CHARS: usize = 150;

/// Facade over one repository backend.
///
/// Wraps either backend behind the same call surface; backends are
/// alternate implementations of one contract and are not mixed at runtime.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    /// Creates a facade using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a post from the given input.
    pub fn create_post(&self, draft: &PostDraft) -> RepoResult<Post> {
        self.repo.create_post(draft)
    }

    /// Creates an unpublished post with just the required fields.
    pub fn create_draft(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> RepoResult<Post> {
        self.repo.create_post(&PostDraft::new(title, content))
    }

    /// Applies a partial update to the post with the given id.
    pub fn update_post(&self, id: &str, patch: &PostPatch) -> RepoResult<Post> {
        self.repo.update_post(id, patch)
    }

    /// Marks a post as published, stamping its publish timestamp.
    pub fn publish_post(&self, id: &str) -> RepoResult<Post> {
        self.repo.update_post(id, &PostPatch::set_published(true))
    }

    /// Returns a post to draft state, clearing its publish timestamp.
    pub fn unpublish_post(&self, id: &str) -> RepoResult<Post> {
        self.repo.update_post(id, &PostPatch::set_published(false))
    }

    /// Point lookup by stable id.
    pub fn get_post_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        self.repo.get_post_by_id(id)
    }

    /// Point lookup by slug.
    pub fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        self.repo.get_post_by_slug(slug)
    }

    /// Lists posts, optionally restricted to published ones.
    pub fn list_posts(&self, published_only: bool) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(&PostListQuery { published_only })
    }

    /// Deletes a post; `Ok(false)` when nothing matched.
    pub fn delete_post(&self, id: &str) -> RepoResult<bool> {
        self.repo.delete_post(id)
    }

    /// Stored excerpt when present, otherwise one derived from the body.
    pub fn excerpt_for(&self, post: &Post) -> String {
        match &post.excerpt {
            Some(excerpt) => excerpt.clone(),
            None => derive_excerpt(&post.content),
        }
    }
}

/// Derives a short summary from a markdown body: the first
/// [`EXCERPT_MAX_CHARS`] characters, with `...` appended when the body was
/// actually truncated.
pub fn derive_excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let excerpt: String = chars.by_ref().take(EXCERPT_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", excerpt.trim_end())
    } else {
        excerpt
    }
}

/// Formats an optional timestamp as a long display date ("June 15, 2023").
/// `None` renders as an empty string so draft rows stay blank in listings.
pub fn format_display_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => String::new(),
    }
}
