//! O'Plaisir Core - Shared document types.
//!
//! This crate provides the types used across the O'Plaisir components:
//! - `api` - The content API (catalog, testimonials, newsletter)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. The document store itself lives in the `api` crate; this
//! crate only describes what goes into it.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for emails, prices, ratings, and ids
//! - [`records`] - Typed records, one per document collection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod records;
pub mod types;

pub use records::*;
pub use types::*;
