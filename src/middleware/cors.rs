//! CORS for browser clients of the Conduit API.
//!
//! - Development: any origin
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`; an empty
//!   list allows no cross-origin callers
//!
//! Credentials mode is never enabled: the token travels in the
//! `Authorization` header, not in cookies.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config.app_env.is_production(), &config.cors_allowed_origins))
}

fn layer(production: bool, allowed_origins: &[String]) -> CorsLayer {
    let base = if production {
        let allowed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    base.allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    fn app(production: bool, origins: &[&str]) -> Router {
        let origins: Vec<String> = origins.iter().map(|s| s.to_string()).collect();
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(layer(production, &origins))
    }

    async fn allow_origin(app: Router, origin: &str) -> Option<HeaderValue> {
        let req = Request::builder()
            .uri("/ping")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned()
    }

    #[tokio::test]
    async fn development_allows_any_origin() {
        let value = allow_origin(app(false, &[]), "http://localhost:4100").await;
        assert_eq!(value.unwrap(), "*");
    }

    #[tokio::test]
    async fn production_only_echoes_listed_origins() {
        let listed = allow_origin(app(true, &["https://conduit.example"]), "https://conduit.example").await;
        assert_eq!(listed.unwrap(), "https://conduit.example");

        let other = allow_origin(app(true, &["https://conduit.example"]), "https://evil.example").await;
        assert!(other.is_none());
    }
}
