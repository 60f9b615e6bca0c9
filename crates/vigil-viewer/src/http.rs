use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use futures::StreamExt;
use tracing::info;
use vigil_queue::QueueClient;

use crate::html::INDEX_HTML;
use crate::stream::{frame_chunks, ChunkOptions};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn QueueClient>,
    pub queue: String,
    pub boundary: String,
    pub poll_idle: Duration,
    pub jpeg_quality: u8,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/video_feed", get(video_feed))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// One long-lived multipart response per connected client. Each part is
/// written to the connection as soon as the consumer loop yields it; the
/// response only ends when the client disconnects or the server shuts
/// down.
///
/// Every client runs its own consumer loop against the same destructively
/// polled queue, so simultaneous clients compete for envelopes and each
/// sees only a subset of the frames. Single-consumer design; fan-out is
/// out of scope.
async fn video_feed(State(state): State<AppState>) -> Response {
    info!(queue = %state.queue, "stream client connected");

    let options = ChunkOptions {
        poll_idle: state.poll_idle,
        jpeg_quality: state.jpeg_quality,
    };
    let marker = format!("--{}\r\nContent-Type: image/jpeg\r\n\r\n", state.boundary);
    let parts = frame_chunks(state.client.clone(), state.queue.clone(), options).map(
        move |jpeg| {
            let mut part = Vec::with_capacity(marker.len() + jpeg.len() + 2);
            part.extend_from_slice(marker.as_bytes());
            part.extend_from_slice(&jpeg);
            part.extend_from_slice(b"\r\n");
            Ok::<Bytes, Infallible>(Bytes::from(part))
        },
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/x-mixed-replace; boundary={}", state.boundary),
        )
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(parts))
        .unwrap()
}
