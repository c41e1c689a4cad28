//! File-backed post repository: one front-matter document per post.
//!
//! # Responsibility
//! - Persist posts as `<slug>.md` documents inside one directory.
//! - Keep document naming, atomic-write and scan semantics in one place.
//!
//! # Invariants
//! - The slug doubles as the post id; a title update that changes the slug
//!   moves the document and therefore changes the id.
//! - Writes are atomic from the caller's perspective: either the previous
//!   or the new full document is observable, never a partial write.
//! - A document that fails to parse is isolated: skipped by `list`,
//!   reported as absent by point lookups, and logged.
//! - A colliding slug silently overwrites the existing document. This
//!   mirrors the relational backend's UNIQUE constraint only in intent, not
//!   behavior; tests pin the divergence.
//!
//! # See also
//! - docs/architecture/storage-backends.md

use crate::model::post::{Post, PostDraft, PostPatch};
use crate::repo::front_matter::PostDocument;
use crate::repo::post_repo::{PostListQuery, PostRepository, RepoError, RepoResult};
use crate::slug::generate_slug;
use chrono::Utc;
use log::warn;
use std::cmp::Reverse;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Document extension, fixed per store.
pub const POST_FILE_EXTENSION: &str = "md";

/// File-backed implementation of [`PostRepository`].
pub struct FsPostRepository {
    dir: PathBuf,
}

impl FsPostRepository {
    /// Creates a store over the given directory.
    ///
    /// The directory is created lazily before the first read or write, so
    /// constructing a store never touches the filesystem.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the post documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> RepoResult<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn document_path(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.{POST_FILE_EXTENSION}"))
    }

    /// Serializes and writes one post document, replacing any existing
    /// document of the same slug. The content is written to a temporary
    /// file in the same directory and renamed over the target, so readers
    /// never observe a partially written document.
    fn write_document(&self, post: &Post) -> RepoResult<()> {
        self.ensure_dir()?;

        let target = self.document_path(&post.slug);
        let staging = self
            .dir
            .join(format!(".{}.{POST_FILE_EXTENSION}.tmp", post.slug));
        fs::write(&staging, PostDocument::from_post(post).render())?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    /// Reads one document by slug. Missing files and unparseable documents
    /// both come back as `Ok(None)`; only directory-level I/O failures
    /// propagate.
    fn read_document(&self, slug: &str) -> RepoResult<Option<Post>> {
        let path = self.document_path(slug);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match PostDocument::parse(&raw) {
            Ok(document) => Ok(Some(document.into_post(slug))),
            Err(err) => {
                warn!(
                    "event=post_document_skipped module=repo_fs status=error slug={slug} error={err}"
                );
                Ok(None)
            }
        }
    }
}

impl PostRepository for FsPostRepository {
    fn create_post(&self, draft: &PostDraft) -> RepoResult<Post> {
        draft.validate()?;

        let slug = generate_slug(&draft.title);
        let post = Post::from_draft(slug.clone(), slug, draft, Utc::now());
        self.write_document(&post)?;
        Ok(post)
    }

    fn update_post(&self, id: &str, patch: &PostPatch) -> RepoResult<Post> {
        patch.validate()?;

        let mut post = self
            .read_document(id)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;

        let previous_slug = post.slug.clone();
        post.apply_patch(patch, Utc::now());
        // Slug is the identity here, so a re-derived slug moves the id too.
        post.id = post.slug.clone();

        self.write_document(&post)?;
        if post.slug != previous_slug {
            match fs::remove_file(self.document_path(&previous_slug)) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(post)
    }

    fn get_post_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        self.read_document(id)
    }

    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        self.read_document(slug)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.ensure_dir()?;

        let mut posts = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(POST_FILE_EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            // Per-document failures must not abort the scan.
            match self.read_document(slug) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        "event=post_document_skipped module=repo_fs status=error slug={slug} error={err}"
                    );
                }
            }
        }

        if query.published_only {
            posts.retain(|post| post.published);
        }

        // Publish date descending, drafts (no date) last, slug as the
        // deterministic tie-break.
        posts.sort_by_key(|post| (Reverse(post.published_at), post.slug.clone()));
        Ok(posts)
    }

    fn delete_post(&self, id: &str) -> RepoResult<bool> {
        match fs::remove_file(self.document_path(id)) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
