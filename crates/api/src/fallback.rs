//! Degraded-mode content.
//!
//! When no store is connected, read endpoints answer from the fixed samples
//! below instead of failing. These functions do no I/O and cannot fail; they
//! always return at least one item.

use serde_json::Value;

use oplaisir_core::{DocumentId, Rating};

use crate::db::Fields;
use crate::models::{ProductListing, TestimonialCard};

/// Sample bestsellers, in display order.
#[must_use]
pub fn bestsellers(limit: Option<usize>) -> Vec<ProductListing> {
    let samples = [
        (
            "demo1",
            "Panier Chocolat Signature",
            89_u8,
            "https://images.unsplash.com/photo-1542838132-92c53300491e?q=80&w=1200&auto=format&fit=crop",
        ),
        (
            "demo2",
            "Coffret Méditerranéen Prestige",
            119,
            "https://images.unsplash.com/photo-1504754524776-8f4f37790ca0?q=80&w=1200&auto=format&fit=crop",
        ),
        (
            "demo3",
            "Assortiment Découverte",
            59,
            "https://images.unsplash.com/photo-1519681393784-d120267933ba?q=80&w=1200&auto=format&fit=crop",
        ),
    ];

    let listings = samples
        .into_iter()
        .map(|(id, title, euros, image)| {
            let fields: Fields = [
                ("title", Value::from(title)),
                ("price", Value::from(f64::from(euros))),
                ("image", Value::from(image)),
                ("tag", Value::from("bestseller")),
            ]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
            ProductListing::new(DocumentId::new(id), fields)
        })
        .collect();

    truncate(listings, limit)
}

/// Sample testimonials, in display order.
#[must_use]
pub fn testimonials() -> Vec<TestimonialCard> {
    let samples = [
        ("Sofia", "Des créations sublimes et un service impeccable.", 5),
        ("Karim", "Le panier Ramadan a fait sensation dans ma famille.", 5),
        ("Lina", "Personnalisation parfaite pour notre mariage.", 4),
    ];

    samples
        .into_iter()
        .map(|(name, message, stars)| TestimonialCard {
            name: Some(name.to_string()),
            message: Some(message.to_string()),
            rating: Rating::new(stars).unwrap_or_default(),
        })
        .collect()
}

/// Keep the first `limit` items, but never fewer than one.
fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit.max(1));
    }
    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bestsellers_order_and_titles() {
        let listings = bestsellers(None);
        let titles: Vec<_> = listings.iter().filter_map(ProductListing::title).collect();
        assert_eq!(
            titles,
            vec![
                "Panier Chocolat Signature",
                "Coffret Méditerranéen Prestige",
                "Assortiment Découverte",
            ]
        );
    }

    #[test]
    fn test_bestsellers_truncated_to_limit() {
        assert_eq!(bestsellers(Some(1)).len(), 1);
        assert_eq!(bestsellers(Some(2)).len(), 2);
        assert_eq!(bestsellers(Some(50)).len(), 3);
    }

    #[test]
    fn test_bestseller_sample_shape() {
        let value = serde_json::to_value(&bestsellers(Some(1))).unwrap();
        assert_eq!(value[0]["_id"], "demo1");
        assert_eq!(value[0]["price"], 89.0);
        assert_eq!(value[0]["tag"], "bestseller");
    }

    #[test]
    fn test_never_empty() {
        assert_eq!(bestsellers(Some(0)).len(), 1);
        assert!(!testimonials().is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(bestsellers(None), bestsellers(None));
        assert_eq!(testimonials(), testimonials());
    }

    #[test]
    fn test_testimonials() {
        let cards = testimonials();
        let summary: Vec<_> = cards
            .iter()
            .map(|c| (c.name.as_deref().unwrap_or_default(), c.rating.stars()))
            .collect();
        assert_eq!(summary, vec![("Sofia", 5), ("Karim", 5), ("Lina", 4)]);
    }
}
