use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Book,
    Brochure,
    Song,
    Faq,
    #[serde(other)]
    Other,
}

/// A downloadable resource (book, brochure, song) or an FAQ entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: ResourceCategory,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource {
    /// Only resources with a file can be downloaded.
    pub fn is_downloadable(&self) -> bool {
        self.file_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ResourceCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// The resources page layout: one bucket per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedResources {
    pub books: Vec<Resource>,
    pub brochures: Vec<Resource>,
    pub songs: Vec<Resource>,
    pub faqs: Vec<Resource>,
}

impl GroupedResources {
    /// Bucket `published` by category; `faqs` come from their own endpoint.
    ///
    /// FAQ entries and unknown categories in `published` are dropped.
    pub fn group(published: Vec<Resource>, faqs: Vec<Resource>) -> Self {
        let mut grouped = GroupedResources {
            faqs,
            ..Default::default()
        };
        for resource in published {
            match resource.category {
                ResourceCategory::Book => grouped.books.push(resource),
                ResourceCategory::Brochure => grouped.brochures.push(resource),
                ResourceCategory::Song => grouped.songs.push(resource),
                ResourceCategory::Faq | ResourceCategory::Other => {}
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: &str, category: &str, file_url: Option<&str>) -> Resource {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": id,
            "category": category,
            "file_url": file_url,
        }))
        .unwrap()
    }

    #[test]
    fn groups_by_category() {
        let grouped = GroupedResources::group(
            vec![
                resource("b1", "book", Some("/f/b1.pdf")),
                resource("s1", "song", Some("/f/s1.mp3")),
                resource("br1", "brochure", None),
                resource("b2", "book", None),
                resource("f1", "faq", None),
                resource("x", "poster", None),
            ],
            vec![resource("f2", "faq", None)],
        );
        assert_eq!(grouped.books.len(), 2);
        assert_eq!(grouped.songs.len(), 1);
        assert_eq!(grouped.brochures.len(), 1);
        assert_eq!(grouped.faqs.len(), 1);
        assert_eq!(grouped.faqs[0].id, "f2");
    }

    #[test]
    fn downloadable_needs_a_file() {
        assert!(resource("b1", "book", Some("/f/b1.pdf")).is_downloadable());
        assert!(!resource("b2", "book", Some(" ")).is_downloadable());
        assert!(!resource("b3", "book", None).is_downloadable());
    }
}
