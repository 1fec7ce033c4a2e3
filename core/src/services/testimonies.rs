use crate::client::ApiClient;
use crate::error::ApiError;
use crate::forms::{TestimonyForm, TestimonySubmission};
use crate::types::{Page, Submission, Testimony, TestimonyQuery, TestimonyUpdate};

const PATH: &str = "/testimonies";

#[derive(Debug, Clone, Copy)]
pub struct Testimonies<'a> {
    client: &'a ApiClient,
}

impl<'a> Testimonies<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Submit a testimony for moderation.
    ///
    /// The body goes out as JSON or multipart depending on the variant; the
    /// content-type is left to the client's request interceptor.
    pub async fn submit(&self, submission: TestimonySubmission) -> Result<Submission<Testimony>, ApiError> {
        self.client
            .post("/testimonies/submit", submission.into_payload()?)
            .await
    }

    /// Validate `form` and submit it.
    pub async fn submit_form(&self, form: &TestimonyForm) -> Result<Submission<Testimony>, ApiError> {
        self.submit(form.submission()?).await
    }

    /// Public testimonies. Anything not yet approved is dropped even if the
    /// server sends it.
    pub async fn list_approved(&self, params: &TestimonyQuery) -> Result<Page<Testimony>, ApiError> {
        let mut page: Page<Testimony> = super::list(self.client, "/testimonies/public", params).await?;
        page.data.retain(Testimony::is_approved);
        Ok(page)
    }

    /// Moderation queue: every testimony regardless of status.
    pub async fn list(&self, params: &TestimonyQuery) -> Result<Page<Testimony>, ApiError> {
        super::list(self.client, PATH, params).await
    }

    pub async fn get(&self, id: &str) -> Result<Testimony, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn update(&self, id: &str, changes: &TestimonyUpdate) -> Result<Testimony, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}
