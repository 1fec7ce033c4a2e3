use crate::client::ApiClient;
use crate::error::ApiError;
use crate::forms::PrayerRequestForm;
use crate::types::{NewPrayerRequest, Page, PrayerQuery, PrayerRequest, PrayerRequestUpdate};

const PATH: &str = "/prayer-requests";

#[derive(Debug, Clone, Copy)]
pub struct PrayerRequests<'a> {
    client: &'a ApiClient,
}

impl<'a> PrayerRequests<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &NewPrayerRequest) -> Result<PrayerRequest, ApiError> {
        super::create(self.client, PATH, request).await
    }

    /// Validate `form` and submit it.
    pub async fn submit_form(&self, form: &PrayerRequestForm) -> Result<PrayerRequest, ApiError> {
        self.create(&form.submission()?).await
    }

    /// Requests their authors agreed to share.
    pub async fn list_public(&self, params: &PrayerQuery) -> Result<Page<PrayerRequest>, ApiError> {
        super::list(self.client, "/prayer-requests/public", params).await
    }

    pub async fn get(&self, id: &str) -> Result<PrayerRequest, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn update(&self, id: &str, changes: &PrayerRequestUpdate) -> Result<PrayerRequest, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}
