//! In-memory stand-in for the parish backend.
//!
//! Serves the REST API consumed by `parish-core` under `/api`, backed by a
//! schemaless document [`Store`](store::Store). State lives for the lifetime
//! of the router; every call to [`app`] starts empty.

pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

use crate::routes::*;
use crate::store::Store;

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug)]
pub enum ServerError {
    NotFound(&'static str),
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::NotFound(collection) => (StatusCode::NOT_FOUND, format!("{collection}: not found")),
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .nest("/api", api())
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

fn api() -> Router<Db> {
    Router::new()
        .route("/donations", get(list_donations).post(create_donation))
        .route("/donations/{id}", item_routes(DONATIONS))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/published", get(list_published_projects))
        .route("/projects/{id}", item_routes(PROJECTS))
        .route("/events", post(create_event))
        .route("/events/get", get(list_events))
        .route("/events/{id}", item_routes(EVENTS))
        .route("/blog-posts", get(list_posts).post(create_post))
        .route("/blog-posts/published", get(list_published_posts))
        .route("/blog-posts/{id}", item_routes(BLOG_POSTS))
        .route("/sermons", get(list_sermons).post(create_sermon))
        .route("/sermons/{id}", item_routes(SERMONS))
        .route("/testimonies", get(list_testimonies))
        .route("/testimonies/submit", post(submit_testimony))
        .route("/testimonies/public", get(list_public_testimonies))
        .route("/testimonies/{id}", item_routes(TESTIMONIES))
        .route("/prayer-requests", post(create_prayer_request))
        .route("/prayer-requests/public", get(list_public_prayer_requests))
        .route("/prayer-requests/{id}", item_routes(PRAYER_REQUESTS))
        .route("/gallery/albums", get(list_albums).post(create_album))
        .route("/gallery/albums/{id}", item_routes(ALBUMS))
        .route("/gallery/videos", get(list_videos).post(create_video))
        .route("/gallery/videos/{id}", item_routes(VIDEOS))
        .route("/resources", post(create_resource))
        .route("/resources/published", get(list_published_resources))
        .route("/resources/faqs", get(list_faqs))
        .route("/resources/{id}", item_routes(RESOURCES))
        .route("/resources/{id}/download", post(increment_download))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
