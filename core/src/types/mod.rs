//! Resource DTOs and response envelopes for the parish API.
//!
//! # Design
//! These types mirror the backend's JSON but are defined independently of
//! the mock server; the integration tests catch schema drift between the
//! two. Identifiers are opaque strings serialized as `_id` and timestamps
//! keep the backend's camelCase names.

pub mod blog;
pub mod donation;
pub mod event;
pub mod gallery;
pub mod prayer;
pub mod project;
pub mod resource;
pub mod sermon;
pub mod testimony;

use serde::{Deserialize, Serialize};

pub use blog::{BlogPost, BlogPostInput, BlogQuery};
pub use donation::{Donation, DonationQuery, DonationTotals, DonationUpdate, NewDonation, PaymentStatus};
pub use event::{Event, EventInput};
pub use gallery::{AlbumInput, GalleryAlbum, GalleryQuery, GalleryVideo, VideoInput};
pub use prayer::{NewPrayerRequest, PrayerQuery, PrayerRequest, PrayerRequestUpdate};
pub use project::{
    DonationExample, NewProject, Project, ProjectCategory, ProjectQuery, ProjectStatus, ProjectStep,
    ProjectUpdate,
};
pub use resource::{GroupedResources, Resource, ResourceCategory, ResourceInput};
pub use sermon::{Sermon, SermonInput};
pub use testimony::{
    NewTestimony, Testimony, TestimonyCategory, TestimonyQuery, TestimonyStatus, TestimonyUpdate,
};

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u32>,
}

/// `{ "data": [...], "pagination": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data, pagination: None }
    }
}

/// `{ "success": true, "message": "...", "data": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// List body that may arrive bare or wrapped in a [`Page`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            Listing::Paged(page) => page,
            Listing::Bare(data) => Page::new(data),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.into_page().data
    }
}

/// Single-item body that may arrive bare or as `{ "data": item, ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Single<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Single<T> {
    pub fn into_inner(self) -> T {
        match self {
            Single::Wrapped { data } => data,
            Single::Bare(item) => item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn listing_accepts_bare_arrays() {
        let listing: Listing<Item> = serde_json::from_str(r#"[{"name":"a"},{"name":"b"}]"#).unwrap();
        let page = listing.into_page();
        assert_eq!(page.data.len(), 2);
        assert!(page.pagination.is_none());
    }

    #[test]
    fn listing_accepts_pages() {
        let listing: Listing<Item> = serde_json::from_str(
            r#"{"data":[{"name":"a"}],"pagination":{"page":2,"limit":1,"total":5,"pages":5}}"#,
        )
        .unwrap();
        let page = listing.into_page();
        assert_eq!(page.data, vec![Item { name: "a".into() }]);
        assert_eq!(page.pagination.unwrap().total, Some(5));
    }

    #[test]
    fn single_unwraps_envelopes() {
        let wrapped: Single<Item> =
            serde_json::from_str(r#"{"success":true,"data":{"name":"x"}}"#).unwrap();
        let bare: Single<Item> = serde_json::from_str(r#"{"name":"y"}"#).unwrap();
        assert_eq!(wrapped.into_inner().name, "x");
        assert_eq!(bare.into_inner().name, "y");
    }

    #[test]
    fn submission_tolerates_missing_data() {
        let sub: Submission<Item> =
            serde_json::from_str(r#"{"success":true,"message":"merci"}"#).unwrap();
        assert!(sub.success);
        assert_eq!(sub.message.as_deref(), Some("merci"));
        assert!(sub.data.is_none());
    }
}
