use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Sermon, SermonInput};

const PATH: &str = "/sermons";

#[derive(Debug, Clone, Copy)]
pub struct Sermons<'a> {
    client: &'a ApiClient,
}

impl<'a> Sermons<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Sermon>, ApiError> {
        Ok(super::list(self.client, PATH, &()).await?.data)
    }

    pub async fn get(&self, id: &str) -> Result<Sermon, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn create(&self, sermon: &SermonInput) -> Result<Sermon, ApiError> {
        super::create(self.client, PATH, sermon).await
    }

    pub async fn update(&self, id: &str, changes: &SermonInput) -> Result<Sermon, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}
