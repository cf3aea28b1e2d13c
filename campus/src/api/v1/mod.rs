pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod router;


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::response::GENERATION_FAILED_MESSAGE;
    use super::testing::{
        state_without_llm, test_state, BrokenGenerator, CannedGenerator, TEST_KEY,
    };
    use crate::api::routes::create_router;

    async fn app() -> (axum::Router, tempfile::TempDir) {
        let (state, dir) = test_state(vec![TEST_KEY.to_string()], Arc::new(CannedGenerator)).await;
        (create_router(state), dir)
    }

    fn authed(method: &str, uri: &str, user: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {TEST_KEY}"))
            .header("X-User-Id", user)
    }

    fn ask_request(user: &str, body: &str) -> Request<Body> {
        authed("POST", "/api/v1/ask", user)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn protected_route_requires_auth() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "unauthorized");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["database"]["status"], "ok");
        assert_eq!(json["data"]["llm"]["status"], "unavailable");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn openapi_json_is_public() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let version = json["openapi"].as_str().unwrap();
        assert!(version.starts_with('3'), "got OpenAPI version {version}");
        assert!(json["paths"].get("/api/v1/ask").is_some());
    }

    #[tokio::test]
    async fn ask_returns_answer_suggestions_and_id() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(ask_request("user-1", r#"{"query":"What is ownership?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["question"], "What is ownership?");
        assert_eq!(
            json["data"]["answer"],
            "Ownership means each value has a single owner."
        );
        assert_eq!(
            json["data"]["suggestions"],
            serde_json::json!(["How do lifetimes work?", "What is borrowing?"])
        );
        assert!(json["data"]["questionId"].is_string());
    }

    #[tokio::test]
    async fn ask_without_user_header_is_unauthorized() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/ask")
                    .header("Authorization", format!("Bearer {TEST_KEY}"))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Missing X-User-Id header");
    }

    #[tokio::test]
    async fn ask_for_unknown_user_is_unauthorized() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(ask_request("nobody", r#"{"query":"hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_query_is_invalid() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(ask_request("user-1", r#"{"query":"   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn missing_query_field_is_reported() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(ask_request("user-1", r#"{"question":"hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
        assert_eq!(json["error"]["message"], "Missing required field: query");
    }

    #[tokio::test]
    async fn exhausted_generation_is_bad_gateway() {
        let (state, _dir) =
            test_state(vec![TEST_KEY.to_string()], Arc::new(BrokenGenerator)).await;
        let app = create_router(state);

        let response = app
            .oneshot(ask_request("user-1", r#"{"query":"What is Rust?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "generation_failed");
        assert_eq!(json["error"]["message"], GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn ask_without_llm_is_not_implemented() {
        let (state, _dir) = state_without_llm(vec![TEST_KEY.to_string()]).await;
        let app = create_router(state);

        let response = app
            .oneshot(ask_request("user-1", r#"{"query":"What is Rust?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_implemented");
    }

    #[tokio::test]
    async fn questions_list_history_after_ask() {
        let (app, _dir) = app().await;

        for query in ["First?", "Second?"] {
            let response = app
                .clone()
                .oneshot(ask_request("user-1", &format!(r#"{{"query":"{query}"}}"#)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(
                authed("GET", "/api/v1/questions?limit=1", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let questions = json["data"]["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0]["question"], "Second?");
        assert_eq!(json["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn malformed_history_limit_uses_envelope() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                authed("GET", "/api/v1/questions?limit=abc", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn recommended_events_match_interests() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                authed("GET", "/api/v1/events:recommended", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let events = json["data"]["events"].as_array().unwrap();
        let ids: Vec<_> = events.iter().map(|e| e["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["event-1", "event-2", "event-3"]);
        assert_eq!(events[0]["isBookmarked"], true);
        assert_eq!(events[1]["isBookmarked"], false);
    }

    #[tokio::test]
    async fn full_catalog_lists_every_event() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                authed("GET", "/api/v1/events", "user-4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["data"]["events"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn bookmark_round_trip() {
        let (app, _dir) = app().await;

        let response = app
            .clone()
            .oneshot(
                authed("PUT", "/api/v1/events/event-4/bookmark", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["eventId"], "event-4");
        assert_eq!(json["data"]["isBookmarked"], true);

        let response = app
            .clone()
            .oneshot(
                authed("GET", "/api/v1/profile", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(
            json["data"]["bookmarkedEvents"],
            serde_json::json!(["event-1", "event-3", "event-4"])
        );

        let response = app
            .oneshot(
                authed("DELETE", "/api/v1/events/event-4/bookmark", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"]["isBookmarked"], false);
    }

    #[tokio::test]
    async fn bookmarking_unknown_event_is_not_found() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                authed("PUT", "/api/v1/events/event-404/bookmark", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn collaborators_share_an_interest() {
        let (app, _dir) = app().await;

        let response = app
            .oneshot(
                authed("GET", "/api/v1/collaborators", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let peers = json["data"]["collaborators"].as_array().unwrap();
        let uids: Vec<_> = peers.iter().map(|p| p["uid"].as_str().unwrap()).collect();
        assert_eq!(uids, vec!["user-2", "user-3", "user-6"]);
        assert_eq!(
            peers[2]["sharedInterests"],
            serde_json::json!(["Python"])
        );
    }

    #[tokio::test]
    async fn update_interests_changes_recommendations() {
        let (app, _dir) = app().await;

        let response = app
            .clone()
            .oneshot(
                authed("PUT", "/api/v1/profile/interests", "user-1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"interests":[" Physics ","physics",""]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["interestTags"], serde_json::json!(["Physics"]));

        let response = app
            .oneshot(
                authed("GET", "/api/v1/events:recommended", "user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        let events = json["data"]["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["id"], "event-4");
    }
}
