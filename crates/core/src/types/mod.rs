//! Core types for O'Plaisir.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod age;
pub mod email;
pub mod id;
pub mod price;
pub mod rating;

pub use age::{Age, AgeError};
pub use email::{Email, EmailError};
pub use id::DocumentId;
pub use price::{Price, PriceError};
pub use rating::{Rating, RatingError};
