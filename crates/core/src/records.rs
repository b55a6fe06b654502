//! Typed records, one per document collection.
//!
//! The document store itself is schemaless; these types are the schema the
//! API enforces at its boundary. Each record knows the name of the
//! collection it lives in (the lowercase entity name).

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::types::{Age, Email, Price, Rating};

/// A typed record stored in a named document collection.
pub trait Record: Serialize + DeserializeOwned {
    /// Name of the collection holding records of this type.
    const COLLECTION: &'static str;
}

/// A catalog product (gift basket, box, assortment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub category: String,
    /// Merchandising tag such as `bestseller` or `nouveau`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Primary image URL. Left unset on write; readers substitute a placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Record for Product {
    const COLLECTION: &'static str = "product";
}

/// A customer testimonial shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Record for Testimonial {
    const COLLECTION: &'static str = "testimonial";
}

/// A newsletter subscription. The email is the uniqueness key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscriber {
    pub email: Email,
}

impl Record for NewsletterSubscriber {
    const COLLECTION: &'static str = "newslettersubscriber";
}

/// A customer account.
///
/// No endpoint reads or writes users yet; the record exists so the collection
/// has a schema when one does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Record for User {
    const COLLECTION: &'static str = "user";
}

const fn default_true() -> bool {
    true
}
