use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{NewProject, Page, Project, ProjectQuery, ProjectUpdate};

const PATH: &str = "/projects";

/// Donation projects: the public catalogue and its admin side.
#[derive(Debug, Clone, Copy)]
pub struct Projects<'a> {
    client: &'a ApiClient,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Projects visible on the public site.
    pub async fn list_published(&self, params: &ProjectQuery) -> Result<Page<Project>, ApiError> {
        super::list(self.client, "/projects/published", params).await
    }

    /// Every project, drafts included.
    pub async fn list(&self, params: &ProjectQuery) -> Result<Page<Project>, ApiError> {
        super::list(self.client, PATH, params).await
    }

    pub async fn get(&self, id: &str) -> Result<Project, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn create(&self, project: &NewProject) -> Result<Project, ApiError> {
        super::create(self.client, PATH, project).await
    }

    pub async fn update(&self, id: &str, changes: &ProjectUpdate) -> Result<Project, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}
