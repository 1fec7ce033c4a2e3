use serde::de::IgnoredAny;

use crate::client::{ApiClient, Payload};
use crate::error::ApiError;
use crate::types::{GroupedResources, Resource, ResourceInput};

const PATH: &str = "/resources";

/// Downloadable books, brochures and songs, plus the FAQ.
#[derive(Debug, Clone, Copy)]
pub struct Resources<'a> {
    client: &'a ApiClient,
}

impl<'a> Resources<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_published(&self) -> Result<Vec<Resource>, ApiError> {
        Ok(super::list(self.client, "/resources/published", &()).await?.data)
    }

    pub async fn faqs(&self) -> Result<Vec<Resource>, ApiError> {
        Ok(super::list(self.client, "/resources/faqs", &()).await?.data)
    }

    /// Published resources bucketed by category next to the FAQ.
    ///
    /// Both listings are requested concurrently; either failing fails the
    /// whole call.
    pub async fn grouped(&self) -> Result<GroupedResources, ApiError> {
        let (published, faqs) = tokio::try_join!(self.list_published(), self.faqs())?;
        Ok(GroupedResources::group(published, faqs))
    }

    pub async fn get(&self, id: &str) -> Result<Resource, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn create(&self, resource: &ResourceInput) -> Result<Resource, ApiError> {
        super::create(self.client, PATH, resource).await
    }

    pub async fn update(&self, id: &str, changes: &ResourceInput) -> Result<Resource, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }

    /// Bump the download counter. Call before handing the file URL out.
    pub async fn increment_download(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("{}/download", super::item_path(PATH, id));
        let _: IgnoredAny = self.client.post(&path, Payload::empty()).await?;
        Ok(())
    }
}
