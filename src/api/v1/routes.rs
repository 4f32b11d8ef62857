/*
 * Responsibility
 * - URL layout of v1
 * - which routes sit behind required vs optional authentication
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    health::health,
    user::{current_user, session},
};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let required = access::require(Router::new().route("/user", get(current_user)), state);
    let optional = access::optional(Router::new().route("/session", get(session)), state);

    Router::new()
        .route("/health", get(health))
        .merge(required)
        .merge(optional)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::services::auth::test_support::{MockStore, auth_service, jake, sign};

    fn app() -> Router {
        let (auth, _) = auth_service(MockStore::with_users([jake()]));
        let state = AppState::new(auth);
        Router::new()
            .nest("/api/v1", routes(&state))
            .with_state(state)
    }

    fn get_req(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_needs_no_token() {
        let res = app().oneshot(get_req("/api/v1/health", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn current_user_returns_profile() {
        let token = sign(&json!({ "id": 42 }));
        let res = app()
            .oneshot(get_req("/api/v1/user", Some(&token)))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await,
            json!({
                "user": {
                    "id": 42,
                    "username": "jake",
                    "email": "jake@jake.jake",
                    "bio": "I work at statefarm",
                    "image": null,
                }
            })
        );
    }

    #[tokio::test]
    async fn current_user_requires_a_token() {
        let res = app().oneshot(get_req("/api/v1/user", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn current_user_rejects_subject_zero() {
        let token = sign(&json!({ "id": 0 }));
        let res = app()
            .oneshot(get_req("/api/v1/user", Some(&token)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn session_reports_anonymous_and_authenticated_callers() {
        let res = app().oneshot(get_req("/api/v1/session", None)).await.unwrap();
        assert_eq!(
            json_body(res).await,
            json!({ "id": 0, "authenticated": false, "username": null })
        );

        let token = sign(&json!({ "id": 42 }));
        let res = app()
            .oneshot(get_req("/api/v1/session", Some(&token)))
            .await
            .unwrap();
        assert_eq!(
            json_body(res).await,
            json!({ "id": 42, "authenticated": true, "username": "jake" })
        );
    }

    #[tokio::test]
    async fn session_with_garbage_token_is_anonymous() {
        let res = app()
            .oneshot(get_req("/api/v1/session", Some("not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["id"], 0);
    }
}
