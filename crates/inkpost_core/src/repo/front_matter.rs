//! Front-matter document codec for the file-backed store.
//!
//! # Responsibility
//! - Render a post as a metadata header plus raw markdown body.
//! - Parse such a document back into header fields and body.
//!
//! # Invariants
//! - Publish state is structural: a `date` line is present exactly when the
//!   post is published.
//! - Header values are single-line; newlines are replaced on write.
//! - Unknown header keys are ignored on read so older binaries can open
//!   newer documents.
//!
//! # See also
//! - docs/architecture/storage-backends.md

use crate::model::post::Post;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Parsed or to-be-rendered document: header fields plus markdown body.
///
/// The slug is not part of the document; it lives in the file name and is
/// joined back in by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub title: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    /// Publish timestamp; `Some` means the document is published.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
}

/// Structural parse failures. Anything tolerable (unknown keys, unparseable
/// dates) degrades instead of failing; see the field handling in `parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentParseError {
    /// Document does not open with a `---` front-matter delimiter.
    MissingOpenDelimiter,
    /// Front-matter block is never closed by a `---` line.
    MissingCloseDelimiter,
    /// Header has no usable `title` entry.
    MissingTitle,
}

impl Display for DocumentParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOpenDelimiter => {
                write!(f, "document does not start with a front-matter delimiter")
            }
            Self::MissingCloseDelimiter => write!(f, "front-matter block is not closed"),
            Self::MissingTitle => write!(f, "front matter has no title"),
        }
    }
}

impl Error for DocumentParseError {}

impl PostDocument {
    /// Projects a post into its document representation.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            cover_image: post.cover_image.clone(),
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
            body: post.content.clone(),
        }
    }

    /// Rehydrates a post, taking identity from the file-name slug.
    pub fn into_post(self, slug: &str) -> Post {
        Post {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: self.title,
            content: self.body,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            published: self.published_at.is_some(),
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Renders the document: `---`-delimited header, then the body verbatim.
    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        push_field(&mut out, "title", &self.title);
        if let Some(date) = self.published_at {
            push_field(&mut out, "date", &date.to_rfc3339());
        }
        if let Some(excerpt) = &self.excerpt {
            push_field(&mut out, "excerpt", excerpt);
        }
        if let Some(cover_image) = &self.cover_image {
            push_field(&mut out, "cover_image", cover_image);
        }
        push_field(&mut out, "created", &self.created_at.to_rfc3339());
        push_field(&mut out, "updated", &self.updated_at.to_rfc3339());
        out.push_str("---\n");
        out.push_str(&self.body);
        out
    }

    /// Parses a document.
    ///
    /// Field handling:
    /// - `title` is required; a missing or empty value is a parse error.
    /// - `date` marks the document published; a missing or unparseable value
    ///   means draft.
    /// - `created`/`updated` fall back to the Unix epoch when missing or
    ///   unparseable, keeping old or hand-edited documents readable.
    pub fn parse(raw: &str) -> Result<Self, DocumentParseError> {
        let after_open = raw
            .strip_prefix("---\n")
            .or_else(|| raw.strip_prefix("---\r\n"))
            .ok_or(DocumentParseError::MissingOpenDelimiter)?;

        let close = after_open
            .find("\n---")
            .ok_or(DocumentParseError::MissingCloseDelimiter)?;
        let header = &after_open[..close];
        let rest = &after_open[close + "\n---".len()..];
        let body = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);

        let mut title = None;
        let mut excerpt = None;
        let mut cover_image = None;
        let mut published_at = None;
        let mut created_at = None;
        let mut updated_at = None;

        for line in header.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "title" => title = Some(value.to_string()),
                "excerpt" => excerpt = Some(value.to_string()),
                "cover_image" => cover_image = Some(value.to_string()),
                "date" => published_at = parse_date(value),
                "created" => created_at = parse_date(value),
                "updated" => updated_at = parse_date(value),
                _ => {}
            }
        }

        Ok(Self {
            title: title.ok_or(DocumentParseError::MissingTitle)?,
            excerpt,
            cover_image,
            published_at,
            created_at: created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated_at: updated_at.unwrap_or(DateTime::UNIX_EPOCH),
            body: body.to_string(),
        })
    }
}

fn push_field(out: &mut String, key: &str, value: &str) {
    // Header values must stay on one line to keep the document parseable.
    let single_line = value.replace(['\n', '\r'], " ");
    out.push_str(key);
    out.push_str(": ");
    out.push_str(single_line.trim());
    out.push('\n');
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
