//! Typed per-resource services.
//!
//! # Design
//! Each resource gets a borrowed handle (`client.donations()`, ...) whose
//! methods map 1:1 to REST endpoints. Handles are `Copy` and hold nothing
//! but the client reference, so they are created per call site. Errors from
//! the client are returned as-is; nothing is cached or retried here.
//!
//! List bodies are read through [`Listing`] and single items through
//! [`Single`], so both bare and `{ "data": ... }` envelopes are accepted.

pub mod blog;
pub mod donations;
pub mod events;
pub mod gallery;
pub mod prayer;
pub mod projects;
pub mod resources;
pub mod sermons;
pub mod testimonies;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::{ApiClient, Payload};
use crate::error::ApiError;
use crate::types::{Listing, Page, Single};

pub use blog::BlogPosts;
pub use donations::Donations;
pub use events::Events;
pub use gallery::Gallery;
pub use prayer::PrayerRequests;
pub use projects::Projects;
pub use resources::Resources;
pub use sermons::Sermons;
pub use testimonies::Testimonies;

impl ApiClient {
    pub fn donations(&self) -> Donations<'_> {
        Donations::new(self)
    }

    pub fn projects(&self) -> Projects<'_> {
        Projects::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    pub fn blog_posts(&self) -> BlogPosts<'_> {
        BlogPosts::new(self)
    }

    pub fn sermons(&self) -> Sermons<'_> {
        Sermons::new(self)
    }

    pub fn testimonies(&self) -> Testimonies<'_> {
        Testimonies::new(self)
    }

    pub fn prayer_requests(&self) -> PrayerRequests<'_> {
        PrayerRequests::new(self)
    }

    pub fn gallery(&self) -> Gallery<'_> {
        Gallery::new(self)
    }

    pub fn resources(&self) -> Resources<'_> {
        Resources::new(self)
    }
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{id}")
}

async fn list<T, Q>(client: &ApiClient, path: &str, params: &Q) -> Result<Page<T>, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let listing: Listing<T> = client.get(path, params).await?;
    Ok(listing.into_page())
}

async fn fetch_one<T: DeserializeOwned>(client: &ApiClient, path: &str) -> Result<T, ApiError> {
    let single: Single<T> = client.get(path, &()).await?;
    Ok(single.into_inner())
}

async fn create<T, B>(client: &ApiClient, path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let single: Single<T> = client.post(path, Payload::json(body)?).await?;
    Ok(single.into_inner())
}

async fn update<T, B>(client: &ApiClient, path: &str, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let single: Single<T> = client.put(path, Payload::json(body)?).await?;
    Ok(single.into_inner())
}
