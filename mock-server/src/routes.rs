//! Request handlers, grouped by resource.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    routing::{get, MethodRouter},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::store::{filter_by, paginate, with_defaults, Document};
use crate::{Db, ServerError};

pub const DONATIONS: &str = "donations";
pub const PROJECTS: &str = "projects";
pub const EVENTS: &str = "events";
pub const BLOG_POSTS: &str = "blog-posts";
pub const SERMONS: &str = "sermons";
pub const TESTIMONIES: &str = "testimonies";
pub const PRAYER_REQUESTS: &str = "prayer-requests";
pub const ALBUMS: &str = "gallery-albums";
pub const VIDEOS: &str = "gallery-videos";
pub const RESOURCES: &str = "resources";

pub const MAX_TESTIMONY_IMAGES: usize = 3;

type Params = Query<HashMap<String, String>>;
type Created = (StatusCode, Json<Value>);

// ---------------------------------------------------------------------------
// Shared CRUD
// ---------------------------------------------------------------------------

/// GET / PUT / DELETE on `/{collection}/{id}`.
pub fn item_routes(collection: &'static str) -> MethodRouter<Db> {
    get(move |State(db): State<Db>, Path(id): Path<String>| fetch(db, collection, id))
        .put(
            move |State(db): State<Db>, Path(id): Path<String>, Json(patch): Json<Document>| {
                update(db, collection, id, patch)
            },
        )
        .delete(move |State(db): State<Db>, Path(id): Path<String>| remove(db, collection, id))
}

async fn fetch(db: Db, collection: &'static str, id: String) -> Result<Json<Document>, ServerError> {
    let store = db.read().await;
    store.get(collection, &id).map(Json).ok_or(ServerError::NotFound(collection))
}

async fn update(db: Db, collection: &'static str, id: String, patch: Document) -> Result<Json<Value>, ServerError> {
    let doc = db
        .write()
        .await
        .update(collection, &id, patch)
        .ok_or(ServerError::NotFound(collection))?;
    Ok(Json(json!({ "success": true, "data": doc })))
}

async fn remove(db: Db, collection: &'static str, id: String) -> Result<Json<Value>, ServerError> {
    db.write()
        .await
        .remove(collection, &id)
        .ok_or(ServerError::NotFound(collection))?;
    info!(collection, id = %id, "document deleted");
    Ok(Json(json!({ "success": true, "message": "deleted" })))
}

async fn insert(db: &Db, collection: &'static str, doc: Document) -> Created {
    let doc = db.write().await.insert(collection, doc);
    info!(collection, id = doc["_id"].as_str(), "document created");
    (StatusCode::CREATED, Json(json!({ "success": true, "data": doc })))
}

fn require(doc: &Document, fields: &[&str]) -> Result<(), ServerError> {
    for field in fields {
        let present = match doc.get(*field) {
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !present {
            return Err(ServerError::BadRequest(format!("{field} is required")));
        }
    }
    Ok(())
}

fn bad_request(error: impl std::fmt::Display) -> ServerError {
    ServerError::BadRequest(error.to_string())
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

pub async fn list_donations(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = db.read().await.all(DONATIONS);
    let docs = filter_by(
        docs,
        &params,
        &[("payment_status", "payment_status"), ("donation_type", "donation_type")],
    );
    Json(paginate(docs, &params))
}

pub async fn create_donation(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["amount"])?;
    let doc = with_defaults(body, json!({ "currency": "EUR", "payment_status": "pending" }));
    Ok(insert(&db, DONATIONS, doc).await)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

const PROJECT_FILTERS: &[(&str, &str)] = &[("category", "category"), ("status", "status"), ("featured", "is_featured")];

pub async fn list_published_projects(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = published(db.read().await.all(PROJECTS));
    Json(paginate(filter_by(docs, &params, PROJECT_FILTERS), &params))
}

pub async fn list_projects(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = db.read().await.all(PROJECTS);
    Json(paginate(filter_by(docs, &params, PROJECT_FILTERS), &params))
}

pub async fn create_project(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title", "goal_amount"])?;
    let doc = with_defaults(
        body,
        json!({
            "description": "",
            "category": "other",
            "status": "planning",
            "current_amount": 0,
            "steps": [],
            "donation_examples": [],
            "impact_points": [],
            "tags": [],
            "is_featured": false,
            "is_published": false,
        }),
    );
    Ok(insert(&db, PROJECTS, doc).await)
}

fn published(docs: Vec<Document>) -> Vec<Document> {
    docs.into_iter()
        .filter(|doc| doc.get("is_published") == Some(&Value::Bool(true)))
        .collect()
}

// ---------------------------------------------------------------------------
// Events, blog posts, sermons
// ---------------------------------------------------------------------------

pub async fn list_events(State(db): State<Db>) -> Json<Vec<Document>> {
    let events = db.read().await.all(EVENTS);
    Json(events)
}

pub async fn create_event(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title", "start_date"])?;
    let doc = with_defaults(body, json!({ "description": "", "images": [], "featured": false }));
    Ok(insert(&db, EVENTS, doc).await)
}

pub async fn list_published_posts(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = published(db.read().await.all(BLOG_POSTS));
    Json(paginate(filter_by(docs, &params, &[("tag", "tags")]), &params))
}

pub async fn list_posts(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = db.read().await.all(BLOG_POSTS);
    Json(paginate(filter_by(docs, &params, &[("tag", "tags")]), &params))
}

pub async fn create_post(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title"])?;
    let doc = with_defaults(
        body,
        json!({ "content": "", "tags": [], "views": 0, "is_published": false }),
    );
    Ok(insert(&db, BLOG_POSTS, doc).await)
}

pub async fn list_sermons(State(db): State<Db>) -> Json<Vec<Document>> {
    let sermons = db.read().await.all(SERMONS);
    Json(sermons)
}

pub async fn create_sermon(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title"])?;
    let doc = with_defaults(body, json!({ "featured": false }));
    Ok(insert(&db, SERMONS, doc).await)
}

// ---------------------------------------------------------------------------
// Testimonies
// ---------------------------------------------------------------------------

const TESTIMONY_FILTERS: &[(&str, &str)] = &[("category", "category"), ("featured", "is_featured")];

/// Accepts a JSON body or a multipart form with up to three `images` files.
pub async fn submit_testimony(State(db): State<Db>, request: Request) -> Result<Created, ServerError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let body = if is_multipart {
        let multipart = Multipart::from_request(request, &()).await.map_err(bad_request)?;
        read_testimony_form(multipart).await?
    } else {
        let Json(body) = Json::<Document>::from_request(request, &()).await.map_err(bad_request)?;
        body
    };

    require(&body, &["title", "content", "author_name", "author_email"])?;
    let mut doc = with_defaults(body, json!({ "category": "autre", "images": [] }));
    doc.insert("status".into(), json!("pending"));
    doc.insert("is_featured".into(), json!(false));
    doc.insert("likes".into(), json!(0));

    let stored = db.write().await.insert(TESTIMONIES, doc);
    info!(id = stored["_id"].as_str(), multipart = is_multipart, "testimony submitted");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Témoignage soumis avec succès. Il sera publié après validation.",
            "data": stored,
        })),
    ))
}

async fn read_testimony_form(mut multipart: Multipart) -> Result<Document, ServerError> {
    let mut doc = Document::new();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(bad_request)?;
                if name != "images" {
                    return Err(ServerError::BadRequest(format!("unexpected file field {name:?}")));
                }
                debug!(file_name = %file_name, size = bytes.len(), "received image");
                images.push(Value::String(format!(
                    "/uploads/testimonies/{}-{file_name}",
                    Uuid::new_v4().simple()
                )));
            }
            None => {
                let text = field.text().await.map_err(bad_request)?;
                doc.insert(name, Value::String(text));
            }
        }
    }

    if images.len() > MAX_TESTIMONY_IMAGES {
        return Err(ServerError::BadRequest(format!(
            "at most {MAX_TESTIMONY_IMAGES} images are accepted"
        )));
    }
    doc.insert("images".into(), Value::Array(images));
    Ok(doc)
}

pub async fn list_public_testimonies(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs: Vec<Document> = db
        .read()
        .await
        .all(TESTIMONIES)
        .into_iter()
        .filter(|doc| doc.get("status").and_then(Value::as_str) == Some("approved"))
        .collect();
    Json(paginate(filter_by(docs, &params, TESTIMONY_FILTERS), &params))
}

pub async fn list_testimonies(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = db.read().await.all(TESTIMONIES);
    let docs = filter_by(docs, &params, &[("status", "status"), ("category", "category")]);
    Json(paginate(docs, &params))
}

// ---------------------------------------------------------------------------
// Prayer requests
// ---------------------------------------------------------------------------

pub async fn create_prayer_request(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title", "description"])?;
    let doc = with_defaults(
        body,
        json!({
            "requester_name": null,
            "is_anonymous": false,
            "is_public": true,
            "status": "active",
            "prayer_count": 0,
        }),
    );
    Ok(insert(&db, PRAYER_REQUESTS, doc).await)
}

pub async fn list_public_prayer_requests(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs: Vec<Document> = db
        .read()
        .await
        .all(PRAYER_REQUESTS)
        .into_iter()
        .filter(|doc| doc.get("is_public") == Some(&Value::Bool(true)))
        .collect();
    Json(paginate(docs, &params))
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

const GALLERY_FILTERS: &[(&str, &str)] = &[("category", "category"), ("published", "is_published")];

pub async fn list_albums(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = db.read().await.all(ALBUMS);
    Json(paginate(filter_by(docs, &params, GALLERY_FILTERS), &params))
}

pub async fn create_album(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title"])?;
    let photo_count = body.get("images").and_then(Value::as_array).map_or(0, Vec::len);
    let doc = with_defaults(
        body,
        json!({
            "description": "",
            "images": [],
            "photoCount": photo_count,
            "is_published": false,
            "order": 0,
        }),
    );
    Ok(insert(&db, ALBUMS, doc).await)
}

pub async fn list_videos(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let docs = db.read().await.all(VIDEOS);
    Json(paginate(filter_by(docs, &params, GALLERY_FILTERS), &params))
}

pub async fn create_video(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title", "videoUrl"])?;
    let doc = with_defaults(body, json!({ "views": 0, "is_published": false, "order": 0 }));
    Ok(insert(&db, VIDEOS, doc).await)
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

fn is_faq(doc: &Document) -> bool {
    doc.get("category").and_then(Value::as_str) == Some("faq")
}

pub async fn list_published_resources(State(db): State<Db>) -> Json<Value> {
    let docs: Vec<Document> = published(db.read().await.all(RESOURCES))
        .into_iter()
        .filter(|doc| !is_faq(doc))
        .collect();
    Json(json!({ "data": docs }))
}

pub async fn list_faqs(State(db): State<Db>) -> Json<Vec<Document>> {
    let docs = published(db.read().await.all(RESOURCES))
        .into_iter()
        .filter(is_faq)
        .collect();
    Json(docs)
}

pub async fn create_resource(State(db): State<Db>, Json(body): Json<Document>) -> Result<Created, ServerError> {
    require(&body, &["title", "category"])?;
    let doc = with_defaults(body, json!({ "download_count": 0, "is_published": false }));
    Ok(insert(&db, RESOURCES, doc).await)
}

pub async fn increment_download(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, ServerError> {
    let mut store = db.write().await;
    let doc = store
        .get_mut(RESOURCES, &id)
        .ok_or(ServerError::NotFound(RESOURCES))?;
    let count = doc.get("download_count").and_then(Value::as_u64).unwrap_or(0) + 1;
    doc.insert("download_count".into(), json!(count));
    Ok(Json(json!({ "success": true, "data": doc.clone() })))
}
