//! Starter catalog content.
//!
//! Seeding fills the `product` and `testimonial` collections only when they
//! are empty, so running it again is a no-op. Used by `POST /api/seed` and
//! `oplaisir-cli seed`.

use oplaisir_core::{Price, Product, Rating, Record, Testimonial};

use crate::db::{Collection, DocumentStore, Fields, StoreError};

/// What a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products_inserted: usize,
    pub testimonials_inserted: usize,
}

/// Seed sample products and testimonials into empty collections.
///
/// Each collection is guarded by its own pre-count, so a collection that
/// already holds documents is left untouched.
///
/// # Errors
///
/// Returns the store error of the first failing count or insert.
#[tracing::instrument(skip_all, fields(store = %store.name()))]
pub async fn seed_sample_content(store: &dyn DocumentStore) -> Result<SeedReport, StoreError> {
    let products_inserted = seed_if_empty(store, &sample_products()).await?;
    let testimonials_inserted = seed_if_empty(store, &sample_testimonials()).await?;

    tracing::info!(products_inserted, testimonials_inserted, "Seed complete");
    Ok(SeedReport {
        products_inserted,
        testimonials_inserted,
    })
}

async fn seed_if_empty<T: Record>(
    store: &dyn DocumentStore,
    records: &[T],
) -> Result<usize, StoreError> {
    let collection = Collection::of::<T>(store);
    if collection.count(&Fields::new()).await? > 0 {
        tracing::debug!(collection = collection.name(), "Collection not empty, skipping");
        return Ok(0);
    }

    for record in records {
        collection.insert_record(record).await?;
    }
    Ok(records.len())
}

/// Starter products.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    [
        (
            "Panier Chocolat Premium",
            "Truffes et pralinés artisanaux",
            89,
            "bestseller",
            "https://images.unsplash.com/photo-1542838132-92c53300491e?q=80&w=1200&auto=format&fit=crop",
        ),
        (
            "Coffret Méditerranéen",
            "Huile d'olive, nougat, miel",
            119,
            "bestseller",
            "https://images.unsplash.com/photo-1504754524776-8f4f37790ca0?q=80&w=1200&auto=format&fit=crop",
        ),
        (
            "Panier Découverte",
            "Sélection du chef",
            59,
            "nouveau",
            "https://images.unsplash.com/photo-1519681393784-d120267933ba?q=80&w=1200&auto=format&fit=crop",
        ),
    ]
    .into_iter()
    .map(|(title, description, euros, tag, image)| Product {
        title: title.to_string(),
        description: Some(description.to_string()),
        price: Price::from_euros(euros),
        category: "paniers".to_string(),
        tag: Some(tag.to_string()),
        image: Some(image.to_string()),
        in_stock: true,
    })
    .collect()
}

/// Starter testimonials.
#[must_use]
pub fn sample_testimonials() -> Vec<Testimonial> {
    [
        ("Sofia", "Des créations sublimes et un service impeccable."),
        ("Karim", "Le panier Ramadan a fait sensation dans ma famille."),
    ]
    .into_iter()
    .map(|(name, message)| Testimonial {
        name: name.to_string(),
        message: message.to_string(),
        rating: Rating::default(),
        avatar: None,
    })
    .collect()
}
