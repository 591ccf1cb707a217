//! Progressive filtering with relaxation fallback.
//!
//! Stages are tried in order and the first one with at least one match wins:
//!
//! 1. `Strict`: industry, genre, and movie type all match
//! 2. `Relaxed`: industry and genre match, movie type ignored
//! 3. `GenreOnly`: genre matches, anywhere in the catalog
//! 4. `WholeCatalog`: every movie
//!
//! Matches keep catalog order; each is scored once the stage is chosen.

use rand::Rng;
use serde::Serialize;

use super::normalize::normalize_opt;
use super::scoring::score_all;
use crate::models::{Catalog, Movie, MovieType, ScoredMovie};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    Strict,
    Relaxed,
    GenreOnly,
    WholeCatalog,
}

impl MatchStage {
    pub const ORDER: [MatchStage; 4] = [
        MatchStage::Strict,
        MatchStage::Relaxed,
        MatchStage::GenreOnly,
        MatchStage::WholeCatalog,
    ];
}

/// A recommendation request in normalized form
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Normalized industry; empty matches every industry
    pub industry: String,
    /// Normalized genre; empty matches no genre
    pub genre: String,
    pub movie_type: MovieType,
}

impl Query {
    pub fn new(industry: Option<&str>, genre: Option<&str>, movie_type: Option<&str>) -> Self {
        Self {
            industry: normalize_opt(industry),
            genre: normalize_opt(genre),
            movie_type: movie_type.map(MovieType::from_label).unwrap_or(MovieType::Any),
        }
    }

    fn industry_matches(&self, movie: &Movie) -> bool {
        self.industry.is_empty() || movie.is_from(&self.industry)
    }

    /// Whether `movie` survives the filter applied at `stage`
    pub fn admits(&self, stage: MatchStage, movie: &Movie) -> bool {
        match stage {
            MatchStage::Strict => {
                self.industry_matches(movie)
                    && movie.has_genre(&self.genre)
                    && self.movie_type.matches(movie)
            }
            MatchStage::Relaxed => self.industry_matches(movie) && movie.has_genre(&self.genre),
            MatchStage::GenreOnly => movie.has_genre(&self.genre),
            MatchStage::WholeCatalog => true,
        }
    }
}

/// Runs the cascade and scores the winning stage's matches.
///
/// An empty catalog yields `WholeCatalog` with no candidates.
pub fn find_candidates<R: Rng>(
    catalog: &Catalog,
    query: &Query,
    rng: &mut R,
) -> (MatchStage, Vec<ScoredMovie>) {
    for stage in MatchStage::ORDER {
        let matches: Vec<&Movie> = catalog
            .movies()
            .iter()
            .filter(|movie| query.admits(stage, movie))
            .collect();

        if !matches.is_empty() {
            tracing::debug!(stage = ?stage, matches = matches.len(), "Filter stage selected");
            return (stage, score_all(matches, rng));
        }
    }

    (MatchStage::WholeCatalog, Vec::new())
}
