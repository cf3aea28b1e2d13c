use std::collections::{HashMap, HashSet};

use chrono::Utc;
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::{TagSet, UserProfile};

use super::{format_timestamp, tags_from_json, tags_to_json};

pub struct UserRepository;

impl UserRepository {
    /// Insert or update a profile, replacing its bookmarks.
    ///
    /// Runs in one transaction: if any bookmark is rejected the stored
    /// profile and bookmarks are left as they were.
    pub async fn upsert(conn: &Connection, user: &UserProfile) -> Result<()> {
        let tx = conn.transaction().await?;

        match Self::write_profile(&tx, user).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(
                        user_id = %user.uid,
                        error = %rollback_err,
                        "Failed to roll back profile upsert"
                    );
                }
                Err(e)
            }
        }
    }

    async fn write_profile(conn: &Connection, user: &UserProfile) -> Result<()> {
        let now = format_timestamp(&Utc::now());

        conn.execute(
            r#"
            INSERT INTO users (
                uid, display_name, email, photo_url, interest_tags, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?6
            )
            ON CONFLICT(uid) DO UPDATE SET
                display_name = excluded.display_name,
                email = excluded.email,
                photo_url = excluded.photo_url,
                interest_tags = excluded.interest_tags,
                updated_at = excluded.updated_at
            "#,
            params![
                user.uid.clone(),
                user.display_name.clone(),
                user.email.clone(),
                user.photo_url.clone(),
                tags_to_json(&user.interest_tags)?,
                now,
            ],
        )
        .await?;

        conn.execute(
            "DELETE FROM bookmarks WHERE user_id = ?1",
            params![user.uid.clone()],
        )
        .await?;
        for event_id in &user.bookmarked_events {
            Self::add_bookmark(conn, &user.uid, event_id).await?;
        }

        Ok(())
    }

    pub async fn get_by_uid(conn: &Connection, uid: &str) -> Result<Option<UserProfile>> {
        let mut rows = conn
            .query(
                r#"
                SELECT uid, display_name, email, photo_url, interest_tags
                FROM users
                WHERE uid = ?1
                "#,
                params![uid],
            )
            .await?;

        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let mut user = Self::row_to_user(&row)?;
        user.bookmarked_events = Self::bookmarks_for(conn, uid).await?;

        Ok(Some(user))
    }

    /// All users ordered by uid, bookmarks included.
    pub async fn list(conn: &Connection) -> Result<Vec<UserProfile>> {
        let mut bookmarks = Self::all_bookmarks(conn).await?;

        let mut rows = conn
            .query(
                r#"
                SELECT uid, display_name, email, photo_url, interest_tags
                FROM users
                ORDER BY uid ASC
                "#,
                (),
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            let mut user = Self::row_to_user(&row)?;
            user.bookmarked_events = bookmarks.remove(&user.uid).unwrap_or_default();
            results.push(user);
        }

        Ok(results)
    }

    pub async fn update_interests(conn: &Connection, uid: &str, interests: &[String]) -> Result<bool> {
        let tags: TagSet = interests.iter().cloned().collect();
        let updated = conn
            .execute(
                "UPDATE users SET interest_tags = ?1, updated_at = ?2 WHERE uid = ?3",
                params![
                    tags_to_json(&tags)?,
                    format_timestamp(&Utc::now()),
                    uid
                ],
            )
            .await?;

        Ok(updated > 0)
    }

    pub async fn add_bookmark(conn: &Connection, uid: &str, event_id: &str) -> Result<()> {
        conn.execute(
            r#"
            INSERT OR IGNORE INTO bookmarks (user_id, event_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
            params![uid, event_id, format_timestamp(&Utc::now())],
        )
        .await?;
        Ok(())
    }

    pub async fn remove_bookmark(conn: &Connection, uid: &str, event_id: &str) -> Result<()> {
        conn.execute(
            "DELETE FROM bookmarks WHERE user_id = ?1 AND event_id = ?2",
            params![uid, event_id],
        )
        .await?;
        Ok(())
    }

    async fn bookmarks_for(conn: &Connection, uid: &str) -> Result<HashSet<String>> {
        let mut rows = conn
            .query(
                "SELECT event_id FROM bookmarks WHERE user_id = ?1",
                params![uid],
            )
            .await?;

        let mut ids = HashSet::new();
        while let Some(row) = rows.next().await? {
            ids.insert(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    async fn all_bookmarks(conn: &Connection) -> Result<HashMap<String, HashSet<String>>> {
        let mut rows = conn
            .query("SELECT user_id, event_id FROM bookmarks", ())
            .await?;

        let mut by_user: HashMap<String, HashSet<String>> = HashMap::new();
        while let Some(row) = rows.next().await? {
            by_user
                .entry(row.get::<String>(0)?)
                .or_default()
                .insert(row.get::<String>(1)?);
        }
        Ok(by_user)
    }

    fn row_to_user(row: &libsql::Row) -> Result<UserProfile> {
        Ok(UserProfile {
            uid: row.get(0)?,
            display_name: row.get(1)?,
            email: row.get(2)?,
            photo_url: row.get(3)?,
            interest_tags: tags_from_json(&row.get::<String>(4)?),
            bookmarked_events: HashSet::new(),
        })
    }
}
