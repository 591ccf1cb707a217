use std::collections::{BTreeSet, HashSet};

use serde_json::Value;

use super::movie::DEFAULT_POPULARITY;
use super::{Movie, ScoredMovie};
use crate::services::normalize::normalize;

/// Snapshot of the movie catalog.
///
/// A snapshot is never edited in place: popularity feedback produces a new
/// snapshot via [`Catalog::with_feedback`], which the owner swaps in once the
/// recommendation has been recorded.
///
/// Alongside the decoded movies the snapshot keeps the records exactly as
/// they were read, including ones that failed to decode and fields `Movie`
/// does not model. Those records are what gets written back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<Movie>,
    records: Vec<Value>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let records = movies
            .iter()
            .map(|movie| serde_json::to_value(movie).unwrap_or_default())
            .collect();
        Self { movies, records }
    }

    /// Builds a snapshot from the stored records and the movies decoded from them
    pub fn from_records(records: Vec<Value>, movies: Vec<Movie>) -> Self {
        Self { movies, records }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// The catalog in its persisted form
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.title == title)
    }

    /// Returns the snapshot that results from recommending `selected`.
    ///
    /// Every catalog movie whose title appears in `selected` gains one
    /// popularity point; all other movies are carried over unchanged. The
    /// stored records get the same increment and nothing else.
    pub fn with_feedback(&self, selected: &[ScoredMovie]) -> Catalog {
        let titles: HashSet<&str> = selected.iter().map(|s| s.movie.title.as_str()).collect();

        let movies = self
            .movies
            .iter()
            .map(|movie| {
                let mut movie = movie.clone();
                if titles.contains(movie.title.as_str()) {
                    movie.popularity += 1;
                }
                movie
            })
            .collect();

        let records = self
            .records
            .iter()
            .map(|record| {
                let mut record = record.clone();
                let picked = record
                    .get("title")
                    .and_then(Value::as_str)
                    .is_some_and(|title| titles.contains(title));
                if let (true, Value::Object(fields)) = (picked, &mut record) {
                    let popularity = fields
                        .get("popularity")
                        .and_then(Value::as_i64)
                        .unwrap_or(DEFAULT_POPULARITY);
                    fields.insert("popularity".to_string(), Value::from(popularity + 1));
                }
                record
            })
            .collect();

        Catalog { movies, records }
    }

    /// Distinct normalized industries, sorted
    pub fn industries(&self) -> BTreeSet<String> {
        self.movies
            .iter()
            .map(|m| normalize(&m.industry))
            .filter(|i| !i.is_empty())
            .collect()
    }

    /// Distinct normalized genres, sorted
    pub fn genres(&self) -> BTreeSet<String> {
        self.movies
            .iter()
            .flat_map(|m| m.genres.iter().map(|g| normalize(g)))
            .filter(|g| !g.is_empty())
            .collect()
    }
}

impl From<Vec<Movie>> for Catalog {
    fn from(movies: Vec<Movie>) -> Self {
        Self::new(movies)
    }
}
