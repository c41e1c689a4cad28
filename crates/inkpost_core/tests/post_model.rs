use chrono::{Duration, Utc};
use inkpost_core::{Post, PostDraft, PostPatch, PostValidationError};

#[test]
fn from_draft_starts_as_draft_with_equal_timestamps() {
    let now = Utc::now();
    let draft = PostDraft::new("First Post", "body");
    let post = Post::from_draft("id-1", "first-post", &draft, now);

    assert_eq!(post.id, "id-1");
    assert_eq!(post.slug, "first-post");
    assert_eq!(post.title, "First Post");
    assert_eq!(post.content, "body");
    assert_eq!(post.excerpt, None);
    assert_eq!(post.cover_image, None);
    assert!(!post.published);
    assert_eq!(post.published_at, None);
    assert_eq!(post.created_at, now);
    assert_eq!(post.updated_at, now);
}

#[test]
fn from_draft_stamps_publish_time_when_starting_published() {
    let now = Utc::now();
    let draft = PostDraft {
        published: true,
        ..PostDraft::new("Launch Day", "we shipped")
    };
    let post = Post::from_draft("id-2", "launch-day", &draft, now);

    assert!(post.published);
    assert_eq!(post.published_at, Some(now));
}

#[test]
fn cover_image_only_patch_keeps_every_other_field() {
    let created = Utc::now();
    let draft = PostDraft {
        excerpt: Some("summary".to_string()),
        published: true,
        ..PostDraft::new("Stable Post", "unchanged body")
    };
    let mut post = Post::from_draft("id-3", "stable-post", &draft, created);

    let later = created + Duration::seconds(5);
    post.apply_patch(
        &PostPatch {
            cover_image: Some("/images/new-cover.png".to_string()),
            ..PostPatch::default()
        },
        later,
    );

    assert_eq!(post.cover_image.as_deref(), Some("/images/new-cover.png"));
    assert_eq!(post.title, "Stable Post");
    assert_eq!(post.content, "unchanged body");
    assert_eq!(post.slug, "stable-post");
    assert_eq!(post.excerpt.as_deref(), Some("summary"));
    assert!(post.published);
    assert_eq!(post.published_at, Some(created));
    assert_eq!(post.created_at, created);
    assert_eq!(post.updated_at, later);
}

#[test]
fn publish_transitions_maintain_published_at() {
    let created = Utc::now();
    let mut post = Post::from_draft("id-4", "draft", &PostDraft::new("Draft", ""), created);
    assert_eq!(post.published_at, None);

    let publish_time = created + Duration::seconds(10);
    post.apply_patch(&PostPatch::set_published(true), publish_time);
    assert!(post.published);
    assert_eq!(post.published_at, Some(publish_time));
    assert!(post.published_at.unwrap() >= post.created_at);

    // Publishing an already published post keeps the original stamp.
    let second_publish = publish_time + Duration::seconds(10);
    post.apply_patch(&PostPatch::set_published(true), second_publish);
    assert_eq!(post.published_at, Some(publish_time));

    let unpublish_time = second_publish + Duration::seconds(10);
    post.apply_patch(&PostPatch::set_published(false), unpublish_time);
    assert!(!post.published);
    assert_eq!(post.published_at, None);
    assert_eq!(post.updated_at, unpublish_time);
}

#[test]
fn title_patch_rederives_slug() {
    let now = Utc::now();
    let mut post = Post::from_draft("id-5", "old-name", &PostDraft::new("Old Name", ""), now);

    post.apply_patch(
        &PostPatch {
            title: Some("Completely New Name!".to_string()),
            ..PostPatch::default()
        },
        now + Duration::seconds(1),
    );

    assert_eq!(post.title, "Completely New Name!");
    assert_eq!(post.slug, "completely-new-name");
}

#[test]
fn draft_validation_rejects_empty_and_unsluggable_titles() {
    let empty = PostDraft::new("   ", "body");
    assert_eq!(empty.validate().unwrap_err(), PostValidationError::EmptyTitle);

    let symbols = PostDraft::new("!!!", "body");
    assert!(matches!(
        symbols.validate().unwrap_err(),
        PostValidationError::UnsluggableTitle { .. }
    ));

    assert!(PostDraft::new("Fine Title", "").validate().is_ok());
}

#[test]
fn patch_validation_only_checks_a_present_title() {
    assert!(PostPatch::default().validate().is_ok());
    assert!(PostPatch::set_published(true).validate().is_ok());

    let bad = PostPatch {
        title: Some(String::new()),
        ..PostPatch::default()
    };
    assert_eq!(bad.validate().unwrap_err(), PostValidationError::EmptyTitle);
}

#[test]
fn post_serialization_uses_expected_wire_fields() {
    let now = Utc::now();
    let draft = PostDraft {
        excerpt: Some("wire summary".to_string()),
        cover_image: Some("/images/wire.png".to_string()),
        published: true,
        ..PostDraft::new("Wire Shape", "wire body")
    };
    let post = Post::from_draft("wire-id", "wire-shape", &draft, now);

    let json = serde_json::to_value(&post).unwrap();
    assert_eq!(json["id"], "wire-id");
    assert_eq!(json["slug"], "wire-shape");
    assert_eq!(json["title"], "Wire Shape");
    assert_eq!(json["content"], "wire body");
    assert_eq!(json["excerpt"], "wire summary");
    assert_eq!(json["cover_image"], "/images/wire.png");
    assert_eq!(json["published"], true);
    assert!(json["published_at"].is_string());

    let decoded: Post = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, post);
}
