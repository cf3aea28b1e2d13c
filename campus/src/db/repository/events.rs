use libsql::{params, Connection};

use crate::error::Result;
use crate::models::Event;

use super::{format_timestamp, parse_timestamp, tags_from_json, tags_to_json};

pub struct EventRepository;

impl EventRepository {
    pub async fn upsert(conn: &Connection, event: &Event) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO events (id, title, description, date, event_url, tags, image)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                date = excluded.date,
                event_url = excluded.event_url,
                tags = excluded.tags,
                image = excluded.image
            "#,
            params![
                event.id.clone(),
                event.title.clone(),
                event.description.clone(),
                format_timestamp(&event.date),
                event.event_url.clone(),
                tags_to_json(&event.tags)?,
                event.image.clone(),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_id(conn: &Connection, id: &str) -> Result<Option<Event>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, title, description, date, event_url, tags, image
                FROM events
                WHERE id = ?1
                "#,
                params![id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_event(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list(conn: &Connection) -> Result<Vec<Event>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, title, description, date, event_url, tags, image
                FROM events
                ORDER BY date ASC, id ASC
                "#,
                (),
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_event(&row)?);
        }

        Ok(results)
    }

    fn row_to_event(row: &libsql::Row) -> Result<Event> {
        Ok(Event {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            date: parse_timestamp(&row.get::<String>(3)?),
            event_url: row.get(4)?,
            tags: tags_from_json(&row.get::<String>(5)?),
            image: row.get(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        crate::db::schema::init_schema(&conn).await.unwrap();
        conn
    }

    fn event(id: &str, date: &str, tags: &[&str]) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: String::new(),
            date: DateTime::parse_from_rfc3339(date)
                .unwrap()
                .with_timezone(&Utc),
            event_url: "#".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn upsert_and_get() {
        let conn = setup_test_db().await;
        let hackathon = event("event-1", "2024-10-26T09:00:00Z", &["Machine Learning"]);

        EventRepository::upsert(&conn, &hackathon).await.unwrap();

        let stored = EventRepository::get_by_id(&conn, "event-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, hackathon);
        assert!(EventRepository::get_by_id(&conn, "event-x")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_date() {
        let conn = setup_test_db().await;
        EventRepository::upsert(&conn, &event("late", "2024-11-18T14:00:00Z", &[]))
            .await
            .unwrap();
        EventRepository::upsert(&conn, &event("early", "2024-10-26T09:00:00Z", &[]))
            .await
            .unwrap();

        let ids: Vec<_> = EventRepository::list(&conn)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }
}
