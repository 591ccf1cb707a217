use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::normalize::normalize;
use crate::models::{Catalog, MovieType};

/// Number of movies tagged with each normalized genre
pub fn count_movies_by_genre(catalog: &Catalog) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for movie in catalog.movies() {
        for genre in &movie.genres {
            *counts.entry(normalize(genre)).or_insert(0) += 1;
        }
    }
    counts
}

fn romance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(love|heart|romance|diary|valentine)").expect("romance pattern is valid")
    })
}

/// Titles that look romantic by keyword, in catalog order
pub fn find_romantic_titles(catalog: &Catalog) -> Vec<String> {
    catalog
        .movies()
        .iter()
        .filter(|movie| romance_pattern().is_match(&movie.title))
        .map(|movie| movie.title.clone())
        .collect()
}

/// Choices offered on the selection page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionOptions {
    pub industries: Vec<String>,
    pub genres: Vec<String>,
    pub movie_types: Vec<&'static str>,
}

pub fn selection_options(catalog: &Catalog) -> SelectionOptions {
    SelectionOptions {
        industries: catalog.industries().into_iter().collect(),
        genres: catalog.genres().into_iter().collect(),
        movie_types: MovieType::SELECTABLE.iter().map(MovieType::label).collect(),
    }
}
