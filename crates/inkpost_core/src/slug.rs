//! URL-safe slug derivation from post titles.
//!
//! # Responsibility
//! - Map an arbitrary title string to a lowercase, hyphen-separated slug.
//!
//! # Invariants
//! - Derivation is pure, total and deterministic: the same title always
//!   yields the same slug, and no input can make it fail.
//! - Uniqueness is NOT guaranteed here. Two titles that normalize to the
//!   same slug collide, and collision policy belongs to the stores.
//!
//! # See also
//! - docs/architecture/data-model.md

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug strip regex"));
static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace run regex"));
static HYPHEN_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-+").expect("valid hyphen run regex"));

/// Derives a URL-safe slug from a display title.
///
/// Rules, applied in order:
/// - lowercase the title;
/// - strip every character that is not a word character, whitespace or `-`;
/// - collapse whitespace runs into a single `-`;
/// - collapse `-` runs into a single `-`;
/// - trim leading/trailing hyphens.
///
/// An empty or all-symbol title yields an empty string. Callers must treat
/// an empty slug as a degenerate identity and reject it before persistence.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHAR_RE.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN_RE.replace_all(stripped.trim(), "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
