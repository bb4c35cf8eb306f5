#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::{path::PathBuf, sync::Arc};
use storage_explorer_api::{config::Config, create_router, services::AppState};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub characters_file: PathBuf,
    // Removes the data directory when the app is dropped
    _data_dir: TempDir,
}

pub async fn create_test_app() -> TestApp {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // Each app gets its own data directory so tests can run in parallel
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let characters_file = data_dir.path().join("data").join("characters.json");

    let mut config = Config::default();
    config.storage.characters_file = characters_file.clone();

    let state = Arc::new(
        AppState::new(config)
            .await
            .expect("Failed to initialize test app state"),
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        characters_file,
        _data_dir: data_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, body: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get_json(&self, uri: &str, cookie: &str) -> serde_json::Value {
        let response = self.get(uri, Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        body_json(response).await
    }

    /// Opens a session and returns its `sid=...` cookie pair
    pub async fn open_session(&self) -> String {
        let response = self.get("/quiz", None).await;
        session_cookie(&response).expect("session cookie issued")
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "invalid JSON body {}: {}",
            String::from_utf8_lossy(&bytes),
            e
        )
    })
}

pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("sid="))
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.trim().to_string())
}

pub fn assert_redirect(response: &Response<Body>, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}
