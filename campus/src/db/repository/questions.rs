use libsql::{params, Connection};

use crate::error::Result;
use crate::models::Question;

use super::{format_timestamp, parse_timestamp};

pub struct QuestionRepository;

impl QuestionRepository {
    pub async fn create(conn: &Connection, question: &Question) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO questions (id, user_id, question, answer, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                question.id.clone(),
                question.user_id.clone(),
                question.question.clone(),
                question.answer.clone(),
                format_timestamp(&question.created_at),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn list_by_user(conn: &Connection, user_id: &str, limit: u32) -> Result<Vec<Question>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, user_id, question, answer, created_at
                FROM questions
                WHERE user_id = ?1
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?2
                "#,
                params![user_id, limit as i64],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_question(&row)?);
        }

        Ok(results)
    }

    fn row_to_question(row: &libsql::Row) -> Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            user_id: row.get(1)?,
            question: row.get(2)?,
            answer: row.get(3)?,
            created_at: parse_timestamp(&row.get::<String>(4)?),
        })
    }
}
