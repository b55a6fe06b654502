//! Gifting occasions.

use axum::Json;

use crate::models::Occasion;

/// Occasions in display order.
pub const OCCASIONS: [Occasion; 6] = [
    Occasion {
        key: "noel",
        label: "Noël",
    },
    Occasion {
        key: "ramadan",
        label: "Ramadan",
    },
    Occasion {
        key: "paques",
        label: "Pâques",
    },
    Occasion {
        key: "saintvalentin",
        label: "Saint-Valentin",
    },
    Occasion {
        key: "anniversaire",
        label: "Anniversaires",
    },
    Occasion {
        key: "mariage",
        label: "Mariages & Naissances",
    },
];

/// `GET /api/occasions`
pub async fn index() -> Json<[Occasion; 6]> {
    Json(OCCASIONS)
}
