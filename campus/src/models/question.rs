use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

/// One answered question in a user's history. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub user_id: String,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(user_id: &str, question: &str, answer: &str) -> Self {
        Self {
            id: nanoid!(),
            user_id: user_id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_question_gets_fresh_id_and_timestamp() {
        let before = Utc::now();
        let a = Question::new("user-1", "What is Rust?", "A language.");
        let b = Question::new("user-1", "What is Rust?", "A language.");

        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 21);
        assert_eq!(a.user_id, "user-1");
        assert!(a.created_at >= before);
    }
}
