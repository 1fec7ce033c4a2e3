use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::blog::sort_newest_first;
use crate::types::{BlogPost, BlogPostInput, BlogQuery, Page};

const PATH: &str = "/blog-posts";

#[derive(Debug, Clone, Copy)]
pub struct BlogPosts<'a> {
    client: &'a ApiClient,
}

impl<'a> BlogPosts<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Published posts, newest first.
    pub async fn list_published(&self, params: &BlogQuery) -> Result<Page<BlogPost>, ApiError> {
        let mut page = super::list(self.client, "/blog-posts/published", params).await?;
        sort_newest_first(&mut page.data);
        Ok(page)
    }

    /// Every post, drafts included, in server order.
    pub async fn list(&self, params: &BlogQuery) -> Result<Page<BlogPost>, ApiError> {
        super::list(self.client, PATH, params).await
    }

    pub async fn get(&self, id: &str) -> Result<BlogPost, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn create(&self, post: &BlogPostInput) -> Result<BlogPost, ApiError> {
        super::create(self.client, PATH, post).await
    }

    pub async fn update(&self, id: &str, changes: &BlogPostInput) -> Result<BlogPost, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{client, BASE};
    use crate::transport::mock::MockTransport;

    #[tokio::test]
    async fn published_posts_come_back_newest_first() {
        let transport = MockTransport::fixed(
            200,
            r#"{"data":[
                {"_id":"old","title":"Carême","createdAt":"2025-03-01T08:00:00Z"},
                {"_id":"undated","title":"Brouillon"},
                {"_id":"new","title":"Pentecôte","createdAt":"2025-06-08T08:00:00Z"}
            ]}"#,
        );
        let page = client(&transport)
            .blog_posts()
            .list_published(&BlogQuery {
                tag: Some("liturgie".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = page.data.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);

        let req = transport.last_request();
        assert_eq!(req.path, format!("{BASE}/blog-posts/published"));
        assert_eq!(req.query_param("tag"), Some("liturgie"));
    }

    #[tokio::test]
    async fn get_accepts_wrapped_post() {
        let transport = MockTransport::fixed(200, r#"{"success":true,"data":{"_id":"b1","title":"Homélie"}}"#);
        let post = client(&transport).blog_posts().get("b1").await.unwrap();
        assert_eq!(post.title, "Homélie");
        assert_eq!(transport.last_request().path, format!("{BASE}/blog-posts/b1"));
    }
}
