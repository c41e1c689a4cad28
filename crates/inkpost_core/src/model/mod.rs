//! Domain model for the post repository.
//!
//! # Responsibility
//! - Define the canonical `Post` entity and its write-side input shapes.
//! - Keep derived-field computation (slug, publish timestamps) in one place
//!   so both storage backends behave identically.
//!
//! # Invariants
//! - `published == true` exactly when `published_at` is set.
//! - `created_at` is immutable; `updated_at` moves forward on every mutation.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod post;
