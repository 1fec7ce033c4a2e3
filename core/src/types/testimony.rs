use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonyCategory {
    Guerison,
    Famille,
    Finances,
    Delivrance,
    Miracle,
    Transformation,
    #[default]
    #[serde(other)]
    Autre,
}

impl TestimonyCategory {
    /// Wire value, as sent in query strings and multipart fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonyCategory::Guerison => "guerison",
            TestimonyCategory::Famille => "famille",
            TestimonyCategory::Finances => "finances",
            TestimonyCategory::Delivrance => "delivrance",
            TestimonyCategory::Miracle => "miracle",
            TestimonyCategory::Transformation => "transformation",
            TestimonyCategory::Autre => "autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestimonyStatus {
    Pending,
    Approved,
    Scheduled,
    Archived,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimony {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_name: String,
    #[serde(default)]
    pub author_location: Option<String>,
    pub category: TestimonyCategory,
    pub status: TestimonyStatus,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub likes: u64,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Testimony {
    pub fn is_approved(&self) -> bool {
        self.status == TestimonyStatus::Approved
    }
}

/// JSON body for a public submission without attachments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTestimony {
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub author_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_location: Option<String>,
    pub category: TestimonyCategory,
}

/// Moderation update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestimonyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// Filters for the public listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestimonyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TestimonyCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}
