use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AlbumInput, GalleryAlbum, GalleryQuery, GalleryVideo, Page, VideoInput};

const ALBUMS: &str = "/gallery/albums";
const VIDEOS: &str = "/gallery/videos";

/// Photo albums and videos.
#[derive(Debug, Clone, Copy)]
pub struct Gallery<'a> {
    client: &'a ApiClient,
}

impl<'a> Gallery<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_albums(&self, params: &GalleryQuery) -> Result<Page<GalleryAlbum>, ApiError> {
        super::list(self.client, ALBUMS, params).await
    }

    pub async fn get_album(&self, id: &str) -> Result<GalleryAlbum, ApiError> {
        super::fetch_one(self.client, &super::item_path(ALBUMS, id)).await
    }

    pub async fn create_album(&self, album: &AlbumInput) -> Result<GalleryAlbum, ApiError> {
        super::create(self.client, ALBUMS, album).await
    }

    pub async fn update_album(&self, id: &str, changes: &AlbumInput) -> Result<GalleryAlbum, ApiError> {
        super::update(self.client, &super::item_path(ALBUMS, id), changes).await
    }

    pub async fn delete_album(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(ALBUMS, id)).await
    }

    pub async fn list_videos(&self, params: &GalleryQuery) -> Result<Page<GalleryVideo>, ApiError> {
        super::list(self.client, VIDEOS, params).await
    }

    pub async fn get_video(&self, id: &str) -> Result<GalleryVideo, ApiError> {
        super::fetch_one(self.client, &super::item_path(VIDEOS, id)).await
    }

    pub async fn create_video(&self, video: &VideoInput) -> Result<GalleryVideo, ApiError> {
        super::create(self.client, VIDEOS, video).await
    }

    pub async fn update_video(&self, id: &str, changes: &VideoInput) -> Result<GalleryVideo, ApiError> {
        super::update(self.client, &super::item_path(VIDEOS, id), changes).await
    }

    pub async fn delete_video(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(VIDEOS, id)).await
    }
}
