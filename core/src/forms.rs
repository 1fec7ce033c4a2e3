//! Public form submissions.
//!
//! Forms hold whatever the visitor typed. `submission()` validates locally
//! and shapes the outgoing payload; a `ValidationError` means no request is
//! ever sent.

use thiserror::Error;

use crate::client::Payload;
use crate::error::ApiError;
use crate::multipart::{FilePart, MultipartForm};
use crate::types::prayer::ACTIVE_STATUS;
use crate::types::{NewPrayerRequest, NewTestimony, TestimonyCategory};

pub const MIN_PRAYER_DESCRIPTION: usize = 10;
pub const MAX_TESTIMONY_IMAGES: usize = 3;

/// Field name repeated once per attached image.
pub const IMAGES_FIELD: &str = "images";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{0:?} is not a valid email address")]
    InvalidEmail(String),

    #[error("at most {max} images can be attached, got {got}")]
    TooManyImages { max: usize, got: usize },

    #[error("{0} is not an image")]
    NotAnImage(String),
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ---------------------------------------------------------------------------
// Prayer requests
// ---------------------------------------------------------------------------

/// Local state of the prayer-request form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerRequestForm {
    pub title: String,
    pub description: String,
    pub requester_name: String,
    pub is_anonymous: bool,
    pub is_public: bool,
    /// Whatever the form last held; never transmitted.
    pub status: String,
}

impl Default for PrayerRequestForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            requester_name: String::new(),
            is_anonymous: false,
            is_public: true,
            status: ACTIVE_STATUS.to_string(),
        }
    }
}

impl PrayerRequestForm {
    /// Validate and build the request body.
    ///
    /// The name is dropped for anonymous requests, status is forced to
    /// `"active"` and the prayer counter starts at zero.
    pub fn submission(&self) -> Result<NewPrayerRequest, ValidationError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        if description.chars().count() < MIN_PRAYER_DESCRIPTION {
            return Err(ValidationError::TooShort {
                field: "description",
                min: MIN_PRAYER_DESCRIPTION,
            });
        }

        let requester_name = if self.is_anonymous {
            None
        } else {
            optional(&self.requester_name)
        };

        Ok(NewPrayerRequest {
            title,
            description,
            requester_name,
            is_anonymous: self.is_anonymous,
            is_public: self.is_public,
            status: ACTIVE_STATUS.to_string(),
            prayer_count: 0,
        })
    }

    /// Back to an empty form after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Testimonies
// ---------------------------------------------------------------------------

/// Testimony body, declared up front as JSON or multipart.
#[derive(Debug, Clone, PartialEq)]
pub enum TestimonySubmission {
    Json(NewTestimony),
    Multipart(MultipartForm),
}

impl TestimonySubmission {
    pub fn into_payload(self) -> Result<Payload, ApiError> {
        match self {
            TestimonySubmission::Json(testimony) => Payload::json(&testimony),
            TestimonySubmission::Multipart(form) => Ok(Payload::Multipart(form)),
        }
    }
}

/// Local state of the "share your testimony" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestimonyForm {
    pub title: String,
    pub content: String,
    pub author_name: String,
    pub author_email: String,
    pub author_location: String,
    pub category: TestimonyCategory,
    pub images: Vec<FilePart>,
}

impl TestimonyForm {
    /// Validate and pick the wire format.
    ///
    /// Without images the body is JSON. With images every scalar field
    /// becomes a text part and each image a file part under `images`.
    pub fn submission(&self) -> Result<TestimonySubmission, ValidationError> {
        let testimony = NewTestimony {
            title: required("title", &self.title)?,
            content: required("content", &self.content)?,
            author_name: required("author_name", &self.author_name)?,
            author_email: validate_email(&self.author_email)?,
            author_location: optional(&self.author_location),
            category: self.category,
        };

        if self.images.len() > MAX_TESTIMONY_IMAGES {
            return Err(ValidationError::TooManyImages {
                max: MAX_TESTIMONY_IMAGES,
                got: self.images.len(),
            });
        }
        if let Some(file) = self
            .images
            .iter()
            .find(|file| !file.content_type.starts_with("image/"))
        {
            return Err(ValidationError::NotAnImage(file.file_name.clone()));
        }

        if self.images.is_empty() {
            return Ok(TestimonySubmission::Json(testimony));
        }

        let mut form = MultipartForm::new()
            .text("title", testimony.title)
            .text("content", testimony.content)
            .text("author_name", testimony.author_name)
            .text("author_email", testimony.author_email)
            .text("author_location", testimony.author_location.unwrap_or_default())
            .text("category", testimony.category.as_str());
        for image in &self.images {
            form.push_file(IMAGES_FIELD, image.clone());
        }
        Ok(TestimonySubmission::Multipart(form))
    }
}

fn validate_email(value: &str) -> Result<String, ValidationError> {
    let email = required("author_email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(email),
        _ => Err(ValidationError::InvalidEmail(email)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipart::Part;

    fn prayer() -> PrayerRequestForm {
        PrayerRequestForm {
            title: "Guérison".to_string(),
            description: "Pour la santé de mon père".to_string(),
            requester_name: "Jean".to_string(),
            ..Default::default()
        }
    }

    fn testimony(images: usize) -> TestimonyForm {
        TestimonyForm {
            title: "Ma guérison".to_string(),
            content: "Le Seigneur m'a relevé".to_string(),
            author_name: "Marie".to_string(),
            author_email: "marie@example.org".to_string(),
            author_location: "Cotonou".to_string(),
            category: TestimonyCategory::Guerison,
            images: (0..images)
                .map(|i| FilePart::new(format!("photo{i}.jpg"), "image/jpeg", vec![i as u8]))
                .collect(),
        }
    }

    #[test]
    fn prayer_keeps_name_when_not_anonymous() {
        let req = prayer().submission().unwrap();
        assert_eq!(req.requester_name.as_deref(), Some("Jean"));
        assert_eq!(req.status, "active");
        assert_eq!(req.prayer_count, 0);
    }

    #[test]
    fn anonymous_prayer_never_sends_a_name() {
        let form = PrayerRequestForm {
            is_anonymous: true,
            ..prayer()
        };
        let req = form.submission().unwrap();
        assert!(req.requester_name.is_none());
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["requester_name"].is_null());
    }

    #[test]
    fn blank_name_is_sent_as_null() {
        let form = PrayerRequestForm {
            requester_name: "   ".to_string(),
            ..prayer()
        };
        assert!(form.submission().unwrap().requester_name.is_none());
    }

    #[test]
    fn status_is_forced_to_active() {
        for status in ["pending", "answered", ""] {
            let form = PrayerRequestForm {
                status: status.to_string(),
                ..prayer()
            };
            assert_eq!(form.submission().unwrap().status, "active");
        }
    }

    #[test]
    fn prayer_requires_title_and_description() {
        let form = PrayerRequestForm {
            title: " ".to_string(),
            ..prayer()
        };
        assert_eq!(form.submission().unwrap_err(), ValidationError::MissingField("title"));

        let form = PrayerRequestForm {
            description: String::new(),
            ..prayer()
        };
        assert_eq!(form.submission().unwrap_err(), ValidationError::MissingField("description"));
    }

    #[test]
    fn prayer_description_minimum_length() {
        let form = PrayerRequestForm {
            description: "Merci".to_string(),
            ..prayer()
        };
        assert_eq!(
            form.submission().unwrap_err(),
            ValidationError::TooShort { field: "description", min: 10 }
        );

        let form = PrayerRequestForm {
            description: "éééééééééé".to_string(),
            ..prayer()
        };
        assert!(form.submission().is_ok());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut form = prayer();
        form.is_anonymous = true;
        form.reset();
        assert_eq!(form, PrayerRequestForm::default());
        assert!(form.is_public);
    }

    #[test]
    fn testimony_without_images_is_json() {
        match testimony(0).submission().unwrap() {
            TestimonySubmission::Json(body) => {
                assert_eq!(body.category, TestimonyCategory::Guerison);
                assert_eq!(body.author_location.as_deref(), Some("Cotonou"));
            }
            other => panic!("expected JSON, got {other:?}"),
        }
    }

    #[test]
    fn testimony_with_images_has_one_part_per_field_and_image() {
        for n in 1..=MAX_TESTIMONY_IMAGES {
            let form = match testimony(n).submission().unwrap() {
                TestimonySubmission::Multipart(form) => form,
                other => panic!("expected multipart, got {other:?}"),
            };
            assert_eq!(form.count(IMAGES_FIELD), n);
            for field in ["title", "content", "author_name", "author_email", "author_location", "category"] {
                assert_eq!(form.count(field), 1, "{field}");
            }
            assert_eq!(form.parts().len(), 6 + n);
            assert_eq!(form.text_value("category"), Some("guerison"));
            assert!(form
                .parts()
                .iter()
                .filter(|(name, _)| name == IMAGES_FIELD)
                .all(|(_, part)| matches!(part, Part::File(_))));
        }
    }

    #[test]
    fn blank_location_is_still_a_multipart_field() {
        let mut t = testimony(1);
        t.author_location = "  ".to_string();
        let TestimonySubmission::Multipart(form) = t.submission().unwrap() else {
            panic!("expected multipart");
        };
        assert_eq!(form.count("author_location"), 1);
        assert_eq!(form.text_value("author_location"), Some(""));
        assert_eq!(form.parts().len(), 7);
    }

    #[test]
    fn too_many_images() {
        assert_eq!(
            testimony(4).submission().unwrap_err(),
            ValidationError::TooManyImages { max: 3, got: 4 }
        );
    }

    #[test]
    fn attachments_must_be_images() {
        let mut t = testimony(1);
        t.images.push(FilePart::new("notes.pdf", "application/pdf", vec![1]));
        assert_eq!(
            t.submission().unwrap_err(),
            ValidationError::NotAnImage("notes.pdf".to_string())
        );
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["marie", "@example.org", "marie@", "a@b@c"] {
            let mut t = testimony(0);
            t.author_email = bad.to_string();
            assert!(matches!(t.submission(), Err(ValidationError::InvalidEmail(_))), "{bad}");
        }
    }

    #[test]
    fn json_submission_becomes_json_payload() {
        let payload = testimony(0).submission().unwrap().into_payload().unwrap();
        let Payload::Json(value) = payload else {
            panic!("expected JSON payload");
        };
        assert_eq!(value["category"], "guerison");
        assert_eq!(value["author_email"], "marie@example.org");
    }
}
