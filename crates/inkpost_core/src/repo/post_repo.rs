//! Post repository contract shared by every storage backend.
//!
//! # Responsibility
//! - Define the CRUD + lifecycle operation set callers depend on.
//! - Define the error taxonomy both backends must surface.
//!
//! # Invariants
//! - `update_post` fails with `NotFound` when the target does not exist.
//! - `delete_post` reports a missing target as `Ok(false)`, never an error.
//! - Validation failures are raised to the caller, never swallowed.
//!
//! # See also
//! - docs/architecture/storage-backends.md

use crate::db::DbError;
use crate::model::post::{Post, PostDraft, PostPatch, PostValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy for post persistence and query operations.
///
/// `Validation` covers invalid caller input; `NotFound` covers missing
/// lookup/update targets; everything else is a storage-level failure
/// unrelated to input validity.
#[derive(Debug)]
pub enum RepoError {
    Validation(PostValidationError),
    NotFound(String),
    Db(DbError),
    Io(std::io::Error),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(key) => write!(f, "post not found: {key}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "post storage i/o failure: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted post data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; apply migrations first")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing; apply migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PostValidationError> for RepoError {
    fn from(value: PostValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Query options for listing posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostListQuery {
    /// Restrict the listing to published posts.
    pub published_only: bool,
}

impl PostListQuery {
    /// Query for the public listing: published posts only.
    pub fn published_only() -> Self {
        Self {
            published_only: true,
        }
    }
}

/// Repository contract for post CRUD and lifecycle operations.
///
/// One repository instance wraps exactly one backing store. Listing is
/// ordered by publish date descending with drafts last; the exact tie-break
/// is backend-defined but deterministic across repeated calls.
pub trait PostRepository {
    /// Validates the draft, assigns identity and slug, stamps timestamps and
    /// persists the new post. Returns the stored representation.
    fn create_post(&self, draft: &PostDraft) -> RepoResult<Post>;

    /// Applies a partial update to the post with the given id and persists
    /// the result. Fields absent from the patch keep their stored value.
    ///
    /// In the file backend the id is the slug, so a title change also
    /// changes the id of the returned post.
    fn update_post(&self, id: &str, patch: &PostPatch) -> RepoResult<Post>;

    /// Point lookup by stable id. `Ok(None)` when no post matches.
    fn get_post_by_id(&self, id: &str) -> RepoResult<Option<Post>>;

    /// Point lookup by slug. `Ok(None)` when no post matches.
    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>>;

    /// Lists posts ordered by publish date descending, drafts last.
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;

    /// Removes the post with the given id. Returns `Ok(true)` when a post
    /// was removed and `Ok(false)` when nothing matched.
    fn delete_post(&self, id: &str) -> RepoResult<bool>;
}
