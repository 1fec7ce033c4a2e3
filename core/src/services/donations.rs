use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Donation, DonationQuery, DonationUpdate, NewDonation, Page};

const PATH: &str = "/donations";

/// Admin donation records.
#[derive(Debug, Clone, Copy)]
pub struct Donations<'a> {
    client: &'a ApiClient,
}

impl<'a> Donations<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, params: &DonationQuery) -> Result<Page<Donation>, ApiError> {
        super::list(self.client, PATH, params).await
    }

    pub async fn get(&self, id: &str) -> Result<Donation, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn create(&self, donation: &NewDonation) -> Result<Donation, ApiError> {
        super::create(self.client, PATH, donation).await
    }

    pub async fn update(&self, id: &str, changes: &DonationUpdate) -> Result<Donation, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}
