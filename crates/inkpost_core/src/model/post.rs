//! Post entity and write-side input shapes.
//!
//! # Responsibility
//! - Define `Post` plus the `PostDraft` (create) and `PostPatch` (partial
//!   update) inputs accepted by every backend.
//! - Centralize derived-field computation: slug derivation, publish-state
//!   transitions and timestamp maintenance.
//!
//! # Invariants
//! - `published_at` is `Some` exactly when `published` is true.
//! - Applying a patch never rewinds `created_at`.
//! - Write paths must call `validate()` before persistence.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::slug::generate_slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque stable post identifier.
///
/// The relational backend mints a UUID v4 rendered to text; the file backend
/// reuses the slug. Kept as a type alias so signatures state intent without
/// forcing one backend's identity scheme on the other.
pub type PostId = String;

/// A single article with identity, content and publish state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier; see [`PostId`].
    pub id: PostId,
    /// URL-safe identity derived from `title`, unique within a store.
    pub slug: String,
    /// Non-empty display title.
    pub title: String,
    /// Markdown body. May be empty for a freshly created draft.
    pub content: String,
    /// Optional stored summary. Absent means callers derive one at
    /// presentation time; the derivation is never written back.
    pub excerpt: Option<String>,
    /// Optional cover image URL or path.
    pub cover_image: Option<String>,
    /// Draft/published flag.
    pub published: bool,
    /// Publish timestamp, present exactly when `published` is true.
    pub published_at: Option<DateTime<Utc>>,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// Refreshed by every mutating operation.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Builds the stored representation of a freshly created post.
    ///
    /// Both backends call this with their own identity (`id`) and the slug
    /// they derived, so creation semantics cannot drift between them:
    /// `published_at` is stamped with `now` iff the draft starts published,
    /// and both timestamps start at `now`.
    pub fn from_draft(
        id: impl Into<PostId>,
        slug: impl Into<String>,
        draft: &PostDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            excerpt: draft.excerpt.clone(),
            cover_image: draft.cover_image.clone(),
            published: draft.published,
            published_at: draft.published.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update in place.
    ///
    /// Fields absent from the patch keep their previous value. A new title
    /// re-derives the slug. Publish-state transitions maintain
    /// `published_at`: turning publishing on stamps `now` (an already
    /// published post keeps its original timestamp), turning it off clears
    /// the timestamp. `updated_at` always moves to `now`.
    pub fn apply_patch(&mut self, patch: &PostPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
            self.slug = generate_slug(title);
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(excerpt) = &patch.excerpt {
            self.excerpt = Some(excerpt.clone());
        }
        if let Some(cover_image) = &patch.cover_image {
            self.cover_image = Some(cover_image.clone());
        }
        if let Some(published) = patch.published {
            if published && !self.published {
                self.published_at = Some(now);
            } else if !published {
                self.published_at = None;
            }
            self.published = published;
        }
        self.updated_at = now;
    }
}

/// Input shape for creating a post.
///
/// Title and content are required fields; everything else defaults to an
/// unpublished post with no summary or cover image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: bool,
}

impl PostDraft {
    /// Creates a draft post input with the two required fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Checks create-input invariants.
    ///
    /// # Errors
    /// - [`PostValidationError::EmptyTitle`] for an empty or
    ///   whitespace-only title.
    /// - [`PostValidationError::UnsluggableTitle`] when the title normalizes
    ///   to an empty slug.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update input. `Some` replaces the stored value, `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
}

impl PostPatch {
    /// Patch that only toggles the publish flag.
    pub fn set_published(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Self::default()
        }
    }

    /// Checks update-input invariants. Only a present title is validated;
    /// all other fields are unconstrained.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<(), PostValidationError> {
    if title.trim().is_empty() {
        return Err(PostValidationError::EmptyTitle);
    }
    if generate_slug(title).is_empty() {
        return Err(PostValidationError::UnsluggableTitle {
            title: title.to_string(),
        });
    }
    Ok(())
}

/// Input validation failures raised before any persistence happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Title normalizes to an empty slug and cannot identify a post.
    UnsluggableTitle { title: String },
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "post title must not be empty"),
            Self::UnsluggableTitle { title } => {
                write!(f, "post title `{title}` normalizes to an empty slug")
            }
        }
    }
}

impl Error for PostValidationError {}
