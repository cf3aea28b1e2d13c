//! Prompt templates for the question-answering flow.
//!
//! Plain `format!()` interpolation; a missing variable is a compile error.

/// System prompt sent with every completion.
pub const SYSTEM_PROMPT: &str = "You are CampusConnect's study assistant. \
You help university students with technical and academic questions. \
Be accurate, concise and friendly.";

/// Prompt asking for a direct answer to a student's question.
///
/// # Example
/// ```
/// use campus::llm::prompts::answer_prompt;
///
/// let prompt = answer_prompt("How do lifetimes work in Rust?");
/// assert!(prompt.contains("lifetimes"));
/// ```
pub fn answer_prompt(user_query: &str) -> String {
    format!(
        r#"Answer the following question from a student.
Use Markdown for formatting and include short code examples where they help.

Question:
{user_query}"#
    )
}

/// Prompt asking for `count` alternative phrasings of the question as a JSON
/// array of strings.
///
/// # Example
/// ```
/// use campus::llm::prompts::did_you_mean_prompt;
///
/// let prompt = did_you_mean_prompt("What is a monad?", 2);
/// assert!(prompt.contains("suggest 2"));
/// assert!(prompt.contains("JSON array"));
/// ```
pub fn did_you_mean_prompt(user_query: &str, count: usize) -> String {
    format!(
        r#"Based on the question: '{user_query}', suggest {count} related or alternative ways to ask this question.
Return the suggestions as a JSON array of strings and nothing else.

Example format:
["How do I ...?", "What is the difference between ...?"]"#
    )
}
