use ask_proxy::config::Config;
use ask_proxy::{AppState, build_app};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn frontend_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Ask DeepSeek</h1>").unwrap();
    std::fs::write(dir.path().join("script.js"), "const API_URL = '/api/ask';").unwrap();
    dir
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn root_serves_index_page() {
    let dir = frontend_dir();
    let app = build_app(AppState::new(Config {
        static_dir: dir.path().to_path_buf(),
        ..Config::default()
    }));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<h1>Ask DeepSeek</h1>");
}

#[tokio::test]
async fn assets_are_served_by_path() {
    let dir = frontend_dir();
    let app = build_app(AppState::new(Config {
        static_dir: dir.path().to_path_buf(),
        ..Config::default()
    }));

    let response = app.oneshot(get("/script.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/api/ask"));
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let dir = frontend_dir();
    let app = build_app(AppState::new(Config {
        static_dir: dir.path().to_path_buf(),
        ..Config::default()
    }));

    let response = app.oneshot(get("/missing.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_headers_are_present() {
    let dir = frontend_dir();
    let app = build_app(AppState::new(Config {
        static_dir: dir.path().to_path_buf(),
        ..Config::default()
    }));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
