use serde::Serialize;

use super::Movie;
use crate::services::normalize::normalize;

/// Coarse bucket a request can narrow the catalog to.
///
/// Each bucket is a fixed threshold over a movie's numeric attributes.
/// Unknown or empty labels map to [`MovieType::Any`], which never filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieType {
    TopRated,
    Popular,
    Underrated,
    NewRelease,
    Classic,
    Short,
    Any,
}

impl MovieType {
    /// Every bucket a caller can ask for, excluding the catch-all
    pub const SELECTABLE: [MovieType; 6] = [
        MovieType::TopRated,
        MovieType::Popular,
        MovieType::Underrated,
        MovieType::NewRelease,
        MovieType::Classic,
        MovieType::Short,
    ];

    /// Classifies a free-form label; matching is case-insensitive and trimmed
    pub fn from_label(label: &str) -> Self {
        match normalize(label).as_str() {
            "top rated" => MovieType::TopRated,
            "popular" => MovieType::Popular,
            "underrated" => MovieType::Underrated,
            "new release" => MovieType::NewRelease,
            "classic" => MovieType::Classic,
            other if other.starts_with("short movie") => MovieType::Short,
            _ => MovieType::Any,
        }
    }

    /// Human-readable label, the form the selection page offers
    pub fn label(&self) -> &'static str {
        match self {
            MovieType::TopRated => "Top Rated",
            MovieType::Popular => "Popular",
            MovieType::Underrated => "Underrated",
            MovieType::NewRelease => "New Release",
            MovieType::Classic => "Classic",
            MovieType::Short => "Short Movie (< 2 hours)",
            MovieType::Any => "Any",
        }
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            MovieType::TopRated => movie.rating >= 8.0,
            MovieType::Popular => movie.popularity >= 8,
            MovieType::Underrated => movie.rating >= 7.0 && movie.popularity <= 6,
            MovieType::NewRelease => movie.year >= 2020,
            MovieType::Classic => movie.year <= 2005,
            MovieType::Short => movie.duration_minutes < 120,
            MovieType::Any => true,
        }
    }
}
