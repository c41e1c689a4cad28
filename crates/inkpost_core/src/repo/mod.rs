//! Repository layer: the shared post-storage contract and its two backends.
//!
//! # Responsibility
//! - Define the use-case oriented data access contract (`PostRepository`).
//! - Isolate storage details (SQL, document files) from callers.
//!
//! # Invariants
//! - Both backends implement identical caller-visible semantics; divergences
//!   (slug-collision behavior, slug-as-id) are documented on the impls.
//! - Repository writes validate input before touching storage.
//!
//! # See also
//! - docs/architecture/storage-backends.md

pub mod front_matter;
pub mod fs;
pub mod post_repo;
pub mod sqlite;
