// ============================================================================
// CMS API - Router
// File: crates/cms-api/src/router.rs
// ============================================================================

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{comment, health, options, page};
use crate::middleware::negotiate_locale;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Public probes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Content API
    let content_routes = Router::new()
        .route("/api/content/options/comment", get(options::comment_options))
        .route("/api/content/comments/{comment_id}/likes", post(comment::like));

    // Pages, rendered in the negotiated locale
    let page_routes = Router::new()
        .route("/", get(page::index))
        .route("/{page}", get(page::page))
        .layer(middleware::from_fn_with_state(state.clone(), negotiate_locale));

    Router::new()
        .merge(health_routes)
        .merge(content_routes)
        .merge(page_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use cms_core::domain::MenuRecord;
    use cms_infrastructure::InMemoryStore;
    use cms_shared::config::{AppConfig, AppSettings, DatabaseSettings, SiteSettings};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::state::Repositories;

    fn config() -> AppConfig {
        AppConfig {
            app: AppSettings {
                env: "test".into(),
                host: "127.0.0.1".into(),
                port: 0,
                name: "Sonic".into(),
            },
            database: DatabaseSettings { url: String::new(), max_connections: 1, min_connections: 1 },
            site: SiteSettings {
                template_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates").into(),
                render_timeout_ms: 5_000,
                read_timeout_ms: 1_000,
                locale_cookie: "sonic_lang".into(),
            },
        }
    }

    fn store() -> Arc<InMemoryStore> {
        let store = InMemoryStore::with_menus(vec![
            MenuRecord::new(1, "Home", "/", 1).with_team("main"),
            MenuRecord::new(2, "Docs", "/docs", 2).with_team("main"),
            MenuRecord::new(3, "API", "/docs/api", 1).with_parent(2).with_team("main"),
            MenuRecord::new(4, "Legal", "/legal", 1).with_team("footer"),
        ]);
        store.set_option("default_menu_team", "main");
        Arc::new(store)
    }

    fn app(store: Arc<InMemoryStore>) -> Router {
        let state = AppState::build(Repositories::shared(store), config()).unwrap();
        build_router(state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
        response.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_index_renders_menus_in_site_locale() {
        let store = store();
        store.set_option("blog_locale", "en");
        let response = app(store).oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_value(&response, header::CONTENT_LANGUAGE), Some("en"));
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("Download now"));
        assert!(html.contains("<li><a href=\"/docs/api\" target=\"_self\">API</a></li>"));
        assert!(html.contains("<a href=\"/legal\">Legal</a>"));
        assert!(html.contains("<span class=\"menu-count\">4</span>"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_default_locale_without_any_signal() {
        let response = app(store()).oneshot(get("/")).await.unwrap();
        assert_eq!(header_value(&response, header::CONTENT_LANGUAGE), Some("zh"));
        assert!(body_text(response).await.contains("立即下载"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_explicit_locale_is_remembered() {
        let response = app(store()).oneshot(get("/?lang=en-US")).await.unwrap();
        assert_eq!(header_value(&response, header::CONTENT_LANGUAGE), Some("en"));
        assert_eq!(
            header_value(&response, header::SET_COOKIE),
            Some("sonic_lang=en; Max-Age=31536000; Path=/")
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cookie_beats_accept_language() {
        let request = Request::builder()
            .uri("/")
            .header(header::COOKIE, "sonic_lang=en")
            .header(header::ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9")
            .body(Body::empty())
            .unwrap();
        let response = app(store()).oneshot(request).await.unwrap();
        assert_eq!(header_value(&response, header::CONTENT_LANGUAGE), Some("en"));
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_named_page_and_missing_page() {
        let app = app(store());
        let response = app.clone().oneshot(get("/docs?lang=en")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<li>Docs &gt; API</li>"));
        assert!(html.contains("<span class=\"team\">footer</span>"));
        assert!(html.contains("Read the docs"));

        let response = app.oneshot(get("/pricing")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_store_failure_fails_page() {
        let store = store();
        store.set_unavailable(true);
        let app = app(store);
        let response = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_health() {
        let app = app(store());
        assert_eq!(app.clone().oneshot(get("/health")).await.unwrap().status(), StatusCode::OK);
        assert_eq!(app.oneshot(get("/health/ready")).await.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_comment_options_hidden_while_disabled() {
        let response = app(store()).oneshot(get("/api/content/options/comment")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Not Found");
        assert!(body.get("data").is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_comment_options_when_enabled() {
        let store = store();
        store.set_option("comment_api_enabled", "true");
        store.set_option("comment_gravatar_default", "identicon");
        let response = app(store).oneshot(get("/api/content/options/comment")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], 200);
        assert_eq!(body["data"]["comment_gravatar_default"], "identicon");
        assert_eq!(body["data"]["comment_gravatar_source"], "//gravatar.com/avatar/");
        assert_eq!(body["data"]["comment_content_placeholder"], "");
    }

    fn like(comment_id: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(format!("/api/content/comments/{comment_id}/likes"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_like_comment() {
        let store = store();
        store.set_option("comment_api_enabled", "true");
        store.insert_comment(7);
        let app = app(store.clone());

        assert_eq!(app.clone().oneshot(like("7")).await.unwrap().status(), StatusCode::OK);
        assert_eq!(store.comment_likes(7), Some(1));
        assert_eq!(app.clone().oneshot(like("8")).await.unwrap().status(), StatusCode::NOT_FOUND);
        assert_eq!(app.oneshot(like("seven")).await.unwrap().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_like_disabled() {
        let store = store();
        store.insert_comment(7);
        let response = app(store.clone()).oneshot(like("7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.comment_likes(7), Some(0));
    }
}
