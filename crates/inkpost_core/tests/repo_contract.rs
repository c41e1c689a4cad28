//! Contract suite run against both backends: whatever storage sits behind
//! the trait, callers must observe identical semantics.

use inkpost_core::db::open_db_in_memory;
use inkpost_core::{
    FsPostRepository, PostDraft, PostListQuery, PostPatch, PostRepository, RepoError,
    SqlitePostRepository,
};

fn create_roundtrip_contract<R: PostRepository>(repo: &R) {
    let draft = PostDraft {
        excerpt: Some("stored summary".to_string()),
        cover_image: Some("/images/cover.png".to_string()),
        published: true,
        ..PostDraft::new("Contract Post", "contract body")
    };
    let created = repo.create_post(&draft).unwrap();

    assert_eq!(created.slug, "contract-post");
    assert_eq!(created.title, draft.title);
    assert_eq!(created.content, draft.content);
    assert_eq!(created.excerpt, draft.excerpt);
    assert_eq!(created.cover_image, draft.cover_image);
    assert_eq!(created.published, draft.published);
    assert!(created.updated_at >= created.created_at);

    let loaded = repo.get_post_by_slug("contract-post").unwrap().unwrap();
    assert_eq!(loaded, created);
    let loaded = repo.get_post_by_id(&created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

fn publish_lifecycle_contract<R: PostRepository>(repo: &R) {
    let created = repo
        .create_post(&PostDraft::new("Lifecycle Contract", "body"))
        .unwrap();
    assert!(!created.published);
    assert_eq!(created.published_at, None);

    let published = repo
        .update_post(&created.id, &PostPatch::set_published(true))
        .unwrap();
    assert!(published.published);
    assert!(published.published_at.unwrap() >= published.created_at);

    let unpublished = repo
        .update_post(&published.id, &PostPatch::set_published(false))
        .unwrap();
    assert!(!unpublished.published);
    assert_eq!(unpublished.published_at, None);
}

fn partial_update_contract<R: PostRepository>(repo: &R) {
    let created = repo
        .create_post(&PostDraft {
            excerpt: Some("keep me".to_string()),
            ..PostDraft::new("Partial Contract", "keep this body")
        })
        .unwrap();

    let updated = repo
        .update_post(
            &created.id,
            &PostPatch {
                cover_image: Some("/images/only-this.png".to_string()),
                ..PostPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.cover_image.as_deref(), Some("/images/only-this.png"));
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.slug, created.slug);
    assert_eq!(updated.excerpt, created.excerpt);
    assert_eq!(updated.published, created.published);
    assert_eq!(updated.created_at, created.created_at);
}

fn missing_target_contract<R: PostRepository>(repo: &R) {
    assert!(repo.get_post_by_slug("never-created").unwrap().is_none());
    assert!(repo.get_post_by_id("never-created").unwrap().is_none());
    assert!(!repo.delete_post("never-created").unwrap());

    let err = repo
        .update_post("never-created", &PostPatch::set_published(true))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

fn validation_contract<R: PostRepository>(repo: &R) {
    let err = repo.create_post(&PostDraft::new("  ", "body")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let created = repo.create_post(&PostDraft::new("Valid Title", "")).unwrap();
    let err = repo
        .update_post(
            &created.id,
            &PostPatch {
                title: Some("???".to_string()),
                ..PostPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

fn published_filter_contract<R: PostRepository>(repo: &R) {
    for (title, published) in [
        ("Alpha Entry", true),
        ("Beta Entry", false),
        ("Gamma Entry", true),
        ("Delta Entry", false),
    ] {
        repo.create_post(&PostDraft {
            published,
            ..PostDraft::new(title, "body")
        })
        .unwrap();
    }

    let all = repo.list_posts(&PostListQuery::default()).unwrap();
    let published = repo.list_posts(&PostListQuery::published_only()).unwrap();

    let mut expected: Vec<&str> = all
        .iter()
        .filter(|post| post.published)
        .map(|post| post.id.as_str())
        .collect();
    let mut actual: Vec<&str> = published.iter().map(|post| post.id.as_str()).collect();
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);

    // Descending publish order; drafts only ever at the tail.
    for pair in published.windows(2) {
        assert!(pair[0].published_at.unwrap() >= pair[1].published_at.unwrap());
    }
    let first_draft = all
        .iter()
        .position(|post| !post.published)
        .unwrap_or(all.len());
    assert!(all[first_draft..].iter().all(|post| !post.published));
}

// Each backend gets its own setup macro so the contract helpers above are
// called with a concrete repository type.
macro_rules! sqlite_repo {
    ($repo:ident) => {
        let conn = open_db_in_memory().unwrap();
        let $repo = SqlitePostRepository::try_new(&conn).unwrap();
    };
}

macro_rules! fs_repo {
    ($repo:ident) => {
        let dir = tempfile::tempdir().unwrap();
        let $repo = FsPostRepository::new(dir.path().join("content"));
    };
}

macro_rules! contract_tests {
    ($module:ident, $setup:ident) => {
        mod $module {
            use super::*;

            #[test]
            fn create_roundtrip() {
                $setup!(repo);
                create_roundtrip_contract(&repo);
            }

            #[test]
            fn publish_lifecycle() {
                $setup!(repo);
                publish_lifecycle_contract(&repo);
            }

            #[test]
            fn partial_update() {
                $setup!(repo);
                partial_update_contract(&repo);
            }

            #[test]
            fn missing_target() {
                $setup!(repo);
                missing_target_contract(&repo);
            }

            #[test]
            fn validation() {
                $setup!(repo);
                validation_contract(&repo);
            }

            #[test]
            fn published_filter() {
                $setup!(repo);
                published_filter_contract(&repo);
            }
        }
    };
}

contract_tests!(sqlite_backend, sqlite_repo);
contract_tests!(fs_backend, fs_repo);
