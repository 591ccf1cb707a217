use serde::{Deserialize, Serialize};

use crate::services::normalize::normalize;

/// A catalog entry. `title` is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Bumped by one every time the movie is recommended
    #[serde(default = "default_popularity")]
    pub popularity: i64,
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

fn default_rating() -> f64 {
    7.0
}

pub(crate) const DEFAULT_POPULARITY: i64 = 5;

fn default_popularity() -> i64 {
    DEFAULT_POPULARITY
}

fn default_year() -> i32 {
    2010
}

fn default_duration() -> u32 {
    120
}

impl Movie {
    /// Creates a movie with default numeric attributes
    pub fn new(title: impl Into<String>, industry: impl Into<String>, genres: &[&str]) -> Self {
        Self {
            title: title.into(),
            industry: industry.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating: default_rating(),
            popularity: default_popularity(),
            year: default_year(),
            duration_minutes: default_duration(),
        }
    }

    /// Whether the movie's industry equals an already-normalized industry
    pub fn is_from(&self, industry: &str) -> bool {
        normalize(&self.industry) == industry
    }

    /// Whether any of the movie's genres equals an already-normalized genre
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| normalize(g) == genre)
    }
}

/// A movie snapshot paired with the score it received during one call.
///
/// Serializes as a single flat object so history entries and API responses
/// carry every movie field next to `score`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredMovie {
    #[serde(flatten)]
    pub movie: Movie,
    pub score: f64,
}
