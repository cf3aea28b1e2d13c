use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use crate::api::state::AppState;
use crate::error::CampusError;
use crate::models::Session;

/// Header naming the end user a request acts for.
pub const USER_ID_HEADER: &str = "x-user-id";

/// `axum::Json` with rejections rendered as `invalid_request` envelopes.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CampusError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for CampusError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

/// `axum::extract::Query` with rejections rendered as `invalid_request`
/// envelopes.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CampusError))]
pub struct AppQuery<T>(pub T);

impl From<QueryRejection> for CampusError {
    fn from(rejection: QueryRejection) -> Self {
        CampusError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}

fn map_json_rejection(rejection: JsonRejection) -> CampusError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                CampusError::Validation(format!("Missing required field: {field}"))
            } else {
                CampusError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            CampusError::Validation(format!("JSON syntax error: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => {
            CampusError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            CampusError::Internal("Failed to read request body".to_string())
        }
        _ => CampusError::Validation(rejection.to_string()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

/// The session user, resolved from the `X-User-Id` header.
///
/// Runs behind the API-key middleware: the key authenticates the calling
/// client, this header says which student it acts for. Unknown users are
/// rejected with `401 unauthorized`.
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = CampusError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let uid = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| CampusError::Unauthorized("Missing X-User-Id header".to_string()))?;

        match state.db.get_user(uid).await? {
            Some(user) => Ok(Self(Session::new(user))),
            None => {
                tracing::debug!(user_id = uid, "Rejected unknown user");
                Err(CampusError::Unauthorized(format!("Unknown user: {uid}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_missing_field_name() {
        let message = "Failed to deserialize the JSON body into the target type: missing field `query` at line 1 column 2";
        assert_eq!(extract_missing_field(message), Some("query"));
        assert_eq!(extract_missing_field("something else"), None);
    }
}
