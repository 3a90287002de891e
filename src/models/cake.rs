use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted cake. An `id <= 0` marks a record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Cake {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub rating: f64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cake {
    pub fn new(
        title: String,
        description: String,
        rating: f64,
        image: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title,
            description,
            rating,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Substring constraints for listing cakes. An empty string leaves its field
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CakeFilter {
    pub title: String,
    pub description: String,
}

impl CakeFilter {
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}
