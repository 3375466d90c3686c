//! Content record model.
//!
//! A [`ContentRecord`] is built exactly once from a validated [`NewContent`]
//! and is read-only afterwards. [`ContentDraft`] is the loosely-typed input
//! collected from a request; [`ContentDraft::validate`] turns it into a
//! [`NewContent`] or reports the first missing required field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::ContentId;

/// A stored content item (product, blog post, page, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContentRecord {
    #[schema(value_type = String)]
    pub id: ContentId,
    /// Free-form category tag, e.g. "product", "blog", "page".
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    /// Location of the attached image, `/uploads/{type}/{id}.{ext}`.
    #[serde(rename = "image_url")]
    pub asset_reference: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Assemble a record from validated input.
    ///
    /// `created_at` and `updated_at` come from the single `now` reading.
    pub fn new(
        id: ContentId,
        input: NewContent,
        asset_reference: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content_type: input.content_type,
            title: input.title,
            slug: input.slug,
            description: input.description,
            meta_title: input.meta_title,
            meta_description: input.meta_description,
            asset_reference,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated input for a new content record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub content_type: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl NewContent {
    /// Input with only the required fields set.
    pub fn new(
        content_type: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            title: title.into(),
            slug: slug.into(),
            description: None,
            meta_title: None,
            meta_description: None,
        }
    }
}

/// Request-side field collection; every field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContentDraft {
    /// Content type tag, e.g. "product", "blog", "page". Required.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Required.
    pub title: Option<String>,
    /// Required.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl ContentDraft {
    /// Set a field by its wire name. Unknown names are ignored.
    ///
    /// Returns `true` if the name was recognised.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "type" => &mut self.content_type,
            "title" => &mut self.title,
            "slug" => &mut self.slug,
            "description" => &mut self.description,
            "meta_title" => &mut self.meta_title,
            "meta_description" => &mut self.meta_description,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Check required fields (`type`, `title`, `slug`).
    pub fn validate(self) -> Result<NewContent> {
        let content_type = self.content_type.ok_or_else(|| Error::missing_field("type"))?;
        let title = self.title.ok_or_else(|| Error::missing_field("title"))?;
        let slug = self.slug.ok_or_else(|| Error::missing_field("slug"))?;

        Ok(NewContent {
            content_type,
            title,
            slug,
            description: self.description,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContentDraft {
        ContentDraft {
            content_type: Some("blog".into()),
            title: Some("Hello".into()),
            slug: Some("hello".into()),
            ..Default::default()
        }
    }

    #[test]
    fn validate_accepts_required_fields() {
        let input = draft().validate().unwrap();
        assert_eq!(input, NewContent::new("blog", "Hello", "hello"));
    }

    #[test]
    fn validate_reports_missing_type() {
        let mut d = draft();
        d.content_type = None;
        let err = d.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: type is required");
    }

    #[test]
    fn validate_reports_missing_slug() {
        let mut d = draft();
        d.slug = None;
        assert!(matches!(d.validate(), Err(Error::Validation(m)) if m.contains("slug")));
    }

    #[test]
    fn empty_strings_are_present() {
        let d = ContentDraft {
            content_type: Some(String::new()),
            title: Some(String::new()),
            slug: Some(String::new()),
            ..Default::default()
        };
        assert!(d.validate().is_ok());
    }

    #[test]
    fn set_by_wire_name() {
        let mut d = ContentDraft::default();
        assert!(d.set("type", "page".into()));
        assert!(d.set("meta_title", "About".into()));
        assert!(!d.set("image", "x".into()));
        assert_eq!(d.content_type.as_deref(), Some("page"));
        assert_eq!(d.meta_title.as_deref(), Some("About"));
    }

    #[test]
    fn record_timestamps_match() {
        let now = Utc::now();
        let record = ContentRecord::new(
            ContentId::new(),
            NewContent::new("blog", "Hello", "hello"),
            None,
            now,
        );
        assert_eq!(record.created_at, record.updated_at);
        assert!(record.asset_reference.is_none());
    }

    #[test]
    fn record_wire_names() {
        let record = ContentRecord::new(
            ContentId::new(),
            NewContent::new("product", "Mug", "mug"),
            Some("/uploads/product/x.png".into()),
            Utc::now(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "product");
        assert_eq!(json["image_url"], "/uploads/product/x.png");
        assert!(json["description"].is_null());
        assert!(json.get("content_type").is_none());
    }
}
