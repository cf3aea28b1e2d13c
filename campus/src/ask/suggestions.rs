use serde_json::Value;

use crate::error::{CampusError, Result};

/// Parse a "did you mean" completion into a list of phrasings.
///
/// Models are asked for a bare JSON array, but routinely wrap it in a code
/// fence or an object such as `{"suggestions": [...]}`; all three shapes are
/// accepted. Anything else is a malformed response and may be retried.
pub fn parse_suggestions(raw: &str) -> Result<Vec<String>> {
    let body = strip_code_fence(raw.trim());

    let value: Value = serde_json::from_str(body).map_err(|e| {
        tracing::debug!(
            response_preview = %body.chars().take(100).collect::<String>(),
            error = %e,
            "Suggestion response is not JSON"
        );
        CampusError::Llm(format!("Failed to parse suggestions: {e}"))
    })?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("suggestions") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CampusError::Llm(
                    "Suggestion object has no `suggestions` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(CampusError::Llm(
                "Suggestion response is not a JSON array".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => Ok(text),
            other => Err(CampusError::Llm(format!(
                "Suggestion entry is not a string: {other}"
            ))),
        })
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the optional language tag on the opening fence
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
