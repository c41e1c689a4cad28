//! Core post repository for inkpost.
//! This crate is the single source of truth for post identity, publish
//! lifecycle and storage semantics; rendering and authoring surfaces are
//! thin consumers of the facade exported here.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod slug;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::post::{Post, PostDraft, PostId, PostPatch, PostValidationError};
pub use repo::front_matter::{DocumentParseError, PostDocument};
pub use repo::fs::{FsPostRepository, POST_FILE_EXTENSION};
pub use repo::post_repo::{PostListQuery, PostRepository, RepoError, RepoResult};
pub use repo::sqlite::SqlitePostRepository;
pub use service::post_service::{derive_excerpt, format_display_date, PostService};
pub use slug::generate_slug;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
