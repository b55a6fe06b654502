//! Response shapes shared by the live and degraded-mode paths.
//!
//! Stored documents are loosely typed, so listings are built from whatever
//! fields a document carries rather than from a strict decode. A document
//! missing a field is shown without it instead of being dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use oplaisir_core::{DocumentId, Rating};

use crate::db::{Document, Fields};

/// Image shown for products stored without one.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1542838686-73ca0c37d0e3?q=80&w=1200&auto=format&fit=crop";

/// `{message}` body for the informational endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A product as listed by the bestsellers endpoint: its id plus every stored
/// field, with `image` always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductListing {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl ProductListing {
    /// Build a listing from `id` and `fields`, setting `image` to
    /// [`PLACEHOLDER_IMAGE`] when it is missing or null.
    #[must_use]
    pub fn new(id: DocumentId, mut fields: Fields) -> Self {
        let has_image = fields.get("image").is_some_and(|image| !image.is_null());
        if !has_image {
            fields.insert("image".to_string(), Value::from(PLACEHOLDER_IMAGE));
        }
        // `_id` is serialized from `id`; a stray stored key would duplicate it.
        fields.remove("_id");
        Self { id, fields }
    }

    /// Shape a stored product. The stored document is not modified.
    #[must_use]
    pub fn from_document(document: Document) -> Self {
        Self::new(document.id, document.fields)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }
}

/// A testimonial as shown on the home page.
///
/// `name` and `message` are null when the stored document lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestimonialCard {
    pub name: Option<String>,
    pub message: Option<String>,
    pub rating: Rating,
}

impl TestimonialCard {
    /// Shape a stored testimonial. A missing or unusable rating shows as
    /// [`Rating::default`].
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        let text = |key: &str| {
            document
                .fields
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            name: text("name"),
            message: text("message"),
            rating: rating_of(document.fields.get("rating")),
        }
    }
}

/// A stored rating: an integer or whole float in `1..=5`, else the default.
fn rating_of(value: Option<&Value>) -> Rating {
    let Some(Value::Number(number)) = value else {
        return Rating::default();
    };
    number
        .as_i64()
        .map_or_else(
            || number.as_f64().and_then(Rating::from_whole),
            |stars| Rating::try_from(stars).ok(),
        )
        .unwrap_or_default()
}

/// A gifting occasion used to browse the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occasion {
    pub key: &'static str,
    pub label: &'static str,
}
