//! SQLite-backed post repository.
//!
//! # Responsibility
//! - Persist posts as rows in the `posts` table, keyed by generated id.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `slug` carries a UNIQUE constraint; a colliding create or title update
//!   fails with a constraint error instead of overwriting.
//! - Write paths validate input before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//!
//! # See also
//! - docs/architecture/storage-backends.md

use crate::model::post::{Post, PostDraft, PostPatch};
use crate::repo::post_repo::{PostListQuery, PostRepository, RepoError, RepoResult};
use crate::slug::generate_slug;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const POST_SELECT_SQL: &str = "SELECT
    id,
    slug,
    title,
    content,
    excerpt,
    cover_image,
    published,
    published_at,
    created_at,
    updated_at
FROM posts";

/// SQLite-backed implementation of [`PostRepository`].
#[derive(Debug)]
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// Fails when the `posts` table or one of its required columns is
    /// missing, which means migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, draft: &PostDraft) -> RepoResult<Post> {
        draft.validate()?;

        let id = Uuid::new_v4().to_string();
        let slug = generate_slug(&draft.title);
        let post = Post::from_draft(id, slug, draft, Utc::now());

        self.conn.execute(
            "INSERT INTO posts (
                id,
                slug,
                title,
                content,
                excerpt,
                cover_image,
                published,
                published_at,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                post.id,
                post.slug,
                post.title,
                post.content,
                post.excerpt.as_deref(),
                post.cover_image.as_deref(),
                bool_to_int(post.published),
                post.published_at,
                post.created_at,
                post.updated_at,
            ],
        )?;

        Ok(post)
    }

    fn update_post(&self, id: &str, patch: &PostPatch) -> RepoResult<Post> {
        patch.validate()?;

        let mut post = self
            .get_post_by_id(id)?
            .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
        post.apply_patch(patch, Utc::now());

        let changed = self.conn.execute(
            "UPDATE posts
             SET
                slug = ?2,
                title = ?3,
                content = ?4,
                excerpt = ?5,
                cover_image = ?6,
                published = ?7,
                published_at = ?8,
                updated_at = ?9
             WHERE id = ?1;",
            params![
                post.id,
                post.slug,
                post.title,
                post.content,
                post.excerpt.as_deref(),
                post.cover_image.as_deref(),
                bool_to_int(post.published),
                post.published_at,
                post.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(post)
    }

    fn get_post_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn get_post_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE slug = ?1;"))?;

        let mut rows = stmt.query([slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        if query.published_only {
            sql.push_str(" AND published = 1");
        }
        // SQLite sorts NULL as the smallest value, so drafts surface last
        // under the descending publish-date order.
        sql.push_str(" ORDER BY published_at DESC, created_at DESC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn delete_post(&self, id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let published = match row.get::<_, i64>("published")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid published value `{other}` in posts.published"
            )));
        }
    };

    let published_at: Option<DateTime<Utc>> = row.get("published_at")?;
    if published != published_at.is_some() {
        return Err(RepoError::InvalidData(format!(
            "posts.published = {published} but posts.published_at is {}",
            if published_at.is_some() { "set" } else { "null" }
        )));
    }

    Ok(Post {
        id: row.get("id")?,
        slug: row.get("slug")?,
        title: row.get("title")?,
        content: row.get("content")?,
        excerpt: row.get("excerpt")?,
        cover_image: row.get("cover_image")?,
        published,
        published_at,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "posts")? {
        return Err(RepoError::MissingRequiredTable("posts"));
    }

    for column in [
        "id",
        "slug",
        "title",
        "content",
        "excerpt",
        "cover_image",
        "published",
        "published_at",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "posts", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "posts",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
