use chrono::{DateTime, Utc};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Event, EventInput};

const PATH: &str = "/events";

#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    client: &'a ApiClient,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All events. The backend serves the listing from `/events/get`.
    pub async fn list(&self) -> Result<Vec<Event>, ApiError> {
        Ok(super::list(self.client, "/events/get", &()).await?.data)
    }

    /// Events not yet finished at `now`, soonest first.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<Event>, ApiError> {
        let mut events: Vec<Event> = self
            .list()
            .await?
            .into_iter()
            .filter(|event| event.is_upcoming(now))
            .collect();
        events.sort_by_key(|event| event.start_date.or(event.end_date));
        Ok(events)
    }

    pub async fn get(&self, id: &str) -> Result<Event, ApiError> {
        super::fetch_one(self.client, &super::item_path(PATH, id)).await
    }

    pub async fn create(&self, event: &EventInput) -> Result<Event, ApiError> {
        super::create(self.client, PATH, event).await
    }

    pub async fn update(&self, id: &str, changes: &EventInput) -> Result<Event, ApiError> {
        super::update(self.client, &super::item_path(PATH, id), changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.remove(&super::item_path(PATH, id)).await
    }
}
