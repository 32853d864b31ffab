//! Stand-in for the listing API, served on a random local port, and a
//! storage wrapper that can refuse writes.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::get;
use axum::Router;
use async_trait::async_trait;
use dc_core::{Error, Post, PostEntry, PostId, PostStorage, Result, SectionStatus};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Default)]
struct MockState {
    routes: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct MockApi {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = MockState::default();
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/*path", get(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Serves `response` for every GET of `path`, e.g. `/section/sports.json`.
    pub async fn respond(&self, path: &str, response: MockResponse) {
        self.state.routes.lock().await.insert(path.to_string(), response);
    }

    pub async fn requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().to_string();
    state.requests.lock().await.push(path.clone());

    let response = state.routes.lock().await.get(&path).cloned();
    match response {
        Some(response) => {
            if !response.delay.is_zero() {
                tokio::time::sleep(response.delay).await;
            }
            Response::builder()
                .status(response.status)
                .header("content-type", "application/json")
                .body(Body::from(response.body))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("not found"))
            .unwrap(),
    }
}

pub fn article(uid: u64, headline: &str, tags: &[&str]) -> serde_json::Value {
    let tags: serde_json::Map<String, serde_json::Value> = tags
        .iter()
        .enumerate()
        .map(|(i, name)| (i.to_string(), serde_json::json!({ "name": name })))
        .collect();

    serde_json::json!({
        "uid": uid,
        "headline": headline,
        "copy": "%3Cp%3EStory%20body%3C%2Fp%3E",
        "abstract": "%3Cp%3EShort%20%26amp%3B%20sweet%3C%2Fp%3E",
        "published": 1609459200,
        "getAuthor": { "1": "Staff%20Reporter" },
        "media": {
            "0": {
                "caption": "%3Cp%3ECaption%3C%2Fp%3E",
                "getAuthor": { "2": "Photo%20Editor" },
                "urlThumbnail": "http%3A%2F%2Fimg%2Ft.jpg",
                "urlPreview": "http%3A%2F%2Fimg%2Fp.jpg",
                "originalUrl": "http%3A%2F%2Fimg%2Fo.jpg"
            }
        },
        "tags": tags,
        "getURL": format!("http%3A%2F%2Fwww.dukechronicle.com%2Farticle%2F{}", uid)
    })
}

pub fn listing(articles: &[serde_json::Value]) -> serde_json::Value {
    let articles: serde_json::Map<String, serde_json::Value> = articles
        .iter()
        .map(|a| (a["uid"].to_string(), a.clone()))
        .collect();
    serde_json::json!([{ "articles": articles }])
}

/// Delegates to an inner store but rejects every `Failed` status write.
pub struct RejectFailedStatus<S> {
    pub inner: S,
}

#[async_trait]
impl<S: PostStorage> PostStorage for RejectFailedStatus<S> {
    async fn merge_posts(&self, posts: IndexMap<PostId, Post>) -> Result<()> {
        self.inner.merge_posts(posts).await
    }

    async fn set_section_ids(&self, section: &str, ids: Vec<PostId>) -> Result<()> {
        self.inner.set_section_ids(section, ids).await
    }

    async fn set_section_status(&self, section: &str, status: SectionStatus) -> Result<()> {
        if status.is_failed() {
            return Err(Error::Storage(format!("status of {} is read-only", section)));
        }
        self.inner.set_section_status(section, status).await
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        self.inner.get_post(id).await
    }

    async fn section_ids(&self, section: &str) -> Result<Option<Vec<PostId>>> {
        self.inner.section_ids(section).await
    }

    async fn section_status(&self, section: &str) -> Result<Option<SectionStatus>> {
        self.inner.section_status(section).await
    }

    async fn posts_for_section(&self, section: &str) -> Result<Vec<PostEntry>> {
        self.inner.posts_for_section(section).await
    }

    async fn post_count(&self) -> Result<usize> {
        self.inner.post_count().await
    }

    async fn top_level_sections(&self) -> Result<Vec<String>> {
        self.inner.top_level_sections().await
    }

    async fn set_top_level_sections(&self, sections: Vec<String>) -> Result<()> {
        self.inner.set_top_level_sections(sections).await
    }

    async fn tab(&self) -> Result<String> {
        self.inner.tab().await
    }

    async fn select_tab(&self, tab: &str) -> Result<()> {
        self.inner.select_tab(tab).await
    }
}
