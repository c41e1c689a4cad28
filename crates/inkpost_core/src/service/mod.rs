//! Caller-facing facade over the repository contract.
//!
//! # Responsibility
//! - Present one uniform operation set regardless of the active backend.
//! - Own the pure presentation helpers (excerpt fallback, display dates)
//!   so they never hide inside a single backend.
//!
//! # See also
//! - docs/architecture/storage-backends.md

pub mod post_service;
