use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;

use super::cascade::{find_candidates, MatchStage, Query};
use super::ratings::{RatingError, Stars};
use crate::config::Config;
use crate::db::{ErrorLog, JsonListFile};
use crate::models::{now_seconds, Catalog, HistoryEntry, Movie, RatingEntry, ScoredMovie};

/// Number of top-scored candidates the final sample is drawn from
pub const POOL_SIZE: usize = 10;

/// Outcome of one recommendation call
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    /// Filter stage that produced the candidates
    pub stage: MatchStage,
    pub movies: Vec<ScoredMovie>,
}

/// Ranks candidates and samples the final result.
///
/// Candidates are sorted by score, highest first (ties keep their order),
/// the best [`POOL_SIZE`] form the pool, and `top_n` of them are drawn
/// uniformly without replacement. A pool no larger than `top_n` is returned
/// whole.
pub fn select_from_pool<R: Rng>(
    mut candidates: Vec<ScoredMovie>,
    top_n: usize,
    rng: &mut R,
) -> Vec<ScoredMovie> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(POOL_SIZE);

    if candidates.len() > top_n {
        candidates.choose_multiple(rng, top_n).cloned().collect()
    } else {
        candidates
    }
}

/// Computes a recommendation without touching any state but the rng
pub fn plan<R: Rng>(catalog: &Catalog, query: &Query, top_n: usize, rng: &mut R) -> Recommendation {
    let (stage, candidates) = find_candidates(catalog, query, rng);
    let candidate_count = candidates.len();
    let movies = select_from_pool(candidates, top_n, rng);

    tracing::info!(
        stage = ?stage,
        candidates = candidate_count,
        selected = movies.len(),
        "Recommendation computed"
    );

    Recommendation { stage, movies }
}

/// Recommendation engine over a file-backed catalog.
///
/// Owns the catalog snapshot plus the history and ratings files. Every
/// mutating call goes through `&mut self`, so a single owner (or a lock
/// around it) is the only writer to the backing files.
pub struct Recommender {
    catalog: Catalog,
    catalog_file: JsonListFile,
    history_file: JsonListFile,
    ratings_file: JsonListFile,
    rng: StdRng,
}

impl Recommender {
    /// Loads the catalog from `catalog_file`. A missing or malformed catalog
    /// starts the engine empty. Records that do not decode are left out of
    /// recommendations but stay in the file.
    pub fn open(
        catalog_file: JsonListFile,
        history_file: JsonListFile,
        ratings_file: JsonListFile,
        rng: StdRng,
    ) -> Self {
        let records = catalog_file.load_values();
        let movies: Vec<Movie> = catalog_file.decode_all(&records);

        tracing::info!(
            path = %catalog_file.path().display(),
            records = records.len(),
            movies = movies.len(),
            "Catalog loaded"
        );

        Self {
            catalog: Catalog::from_records(records, movies),
            catalog_file,
            history_file,
            ratings_file,
            rng,
        }
    }

    /// Builds an engine from the configured file locations
    pub fn from_config(config: &Config) -> Self {
        let error_log = ErrorLog::new(&config.error_log_path);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::open(
            JsonListFile::new(&config.catalog_path, error_log.clone()),
            JsonListFile::new(&config.history_path, error_log.clone()),
            JsonListFile::new(&config.ratings_path, error_log),
            rng,
        )
    }

    /// Replaces the randomness source with a seeded one
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recommends up to `top_n` movies for a free-form query.
    ///
    /// After selection the call is appended to the history file, then the
    /// selected movies gain one popularity point each and the new catalog is
    /// written back before returning. The returned snapshots carry the
    /// popularity they had when they were scored.
    pub fn recommend(
        &mut self,
        industry: Option<&str>,
        genre: Option<&str>,
        movie_type: Option<&str>,
        top_n: usize,
    ) -> Recommendation {
        let query = Query::new(industry, genre, movie_type);
        let recommendation = plan(&self.catalog, &query, top_n, &mut self.rng);

        self.record_history(&query, movie_type, &recommendation.movies);
        self.apply_feedback(&recommendation.movies);

        recommendation
    }

    fn record_history(&self, query: &Query, movie_type: Option<&str>, selected: &[ScoredMovie]) {
        let entry = HistoryEntry {
            timestamp: now_seconds(),
            industry: query.industry.clone(),
            genre: query.genre.clone(),
            movie_type: movie_type.map(str::to_string),
            recommended: selected.to_vec(),
        };

        self.history_file.append(&entry);
    }

    fn apply_feedback(&mut self, selected: &[ScoredMovie]) {
        if selected.is_empty() {
            return;
        }

        let next = self.catalog.with_feedback(selected);
        self.catalog_file.save(next.records());
        // in-memory snapshot stays authoritative even if the write failed
        self.catalog = next;
    }

    /// Stores a 1-5 star rating for `title`.
    ///
    /// Ratings are append-only and do not influence scoring.
    pub fn rate_movie(&mut self, title: &str, stars: i64) -> Result<RatingEntry, RatingError> {
        let stars = Stars::try_from(stars)?;
        Ok(self.record_rating(title, stars))
    }

    /// Stores an already-validated rating
    pub fn record_rating(&mut self, title: &str, stars: Stars) -> RatingEntry {
        let entry = RatingEntry {
            title: title.trim().to_string(),
            stars: stars.get(),
            time: now_seconds(),
        };

        self.ratings_file.append(&entry);
        tracing::info!(title = %entry.title, stars = entry.stars, "Rating recorded");

        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn scored(title: &str, score: f64) -> ScoredMovie {
        ScoredMovie {
            movie: Movie::new(title, "hollywood", &["drama"]),
            score,
        }
    }

    fn titles(movies: &[ScoredMovie]) -> Vec<&str> {
        movies.iter().map(|m| m.movie.title.as_str()).collect()
    }

    fn engine_in(dir: &Path, movies: &[Movie]) -> Recommender {
        let log = ErrorLog::new(dir.join("log.txt"));
        let catalog_file = JsonListFile::new(dir.join("movies.json"), log.clone());
        catalog_file.save(movies);

        Recommender::open(
            catalog_file,
            JsonListFile::new(dir.join("history.json"), log.clone()),
            JsonListFile::new(dir.join("ratings.json"), log),
            StdRng::seed_from_u64(17),
        )
    }

    fn setup(movies: &[Movie]) -> (TempDir, Recommender) {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(dir.path(), movies);
        (dir, engine)
    }

    #[test]
    fn test_small_pool_is_returned_sorted() {
        let mut rng = StdRng::seed_from_u64(0);
        let candidates = vec![scored("low", 5.0), scored("high", 9.0), scored("mid", 7.0)];

        let selected = select_from_pool(candidates, 5, &mut rng);

        assert_eq!(titles(&selected), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let candidates = vec![scored("a", 7.0), scored("b", 8.0), scored("c", 7.0)];

        let selected = select_from_pool(candidates, 3, &mut rng);

        assert_eq!(titles(&selected), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sample_comes_from_top_ten() {
        let candidates: Vec<ScoredMovie> = (0..25)
            .map(|i| scored(&format!("m{}", i), i as f64))
            .collect();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select_from_pool(candidates.clone(), 4, &mut rng);

            assert_eq!(selected.len(), 4);
            assert!(selected.iter().all(|m| m.score >= 15.0));
            let mut unique = titles(&selected);
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn test_top_n_zero_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let selected = select_from_pool(vec![scored("a", 1.0)], 0, &mut rng);
        assert!(selected.is_empty());
    }

    #[test]
    fn test_recommend_updates_catalog_file_and_memory() {
        let (dir, mut engine) = setup(&[
            Movie::new("A", "hollywood", &["drama"]),
            Movie::new("B", "hollywood", &["comedy"]),
        ]);

        let result = engine.recommend(Some("hollywood"), Some("drama"), None, 5);

        assert_eq!(result.stage, MatchStage::Strict);
        assert_eq!(titles(&result.movies), vec!["A"]);
        // snapshot returned before feedback
        assert_eq!(result.movies[0].movie.popularity, 5);
        assert_eq!(engine.catalog().get("A").unwrap().popularity, 6);
        assert_eq!(engine.catalog().get("B").unwrap().popularity, 5);

        let on_disk: Vec<Movie> =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("movies.json")).unwrap())
                .unwrap();
        assert_eq!(on_disk, engine.catalog().movies());
    }

    #[test]
    fn test_recommend_records_history_matching_result() {
        let (dir, mut engine) = setup(&[Movie::new("A", "Hollywood", &["Drama"])]);

        let result = engine.recommend(Some(" Hollywood"), Some("DRAMA "), Some("Top Rated"), 5);

        let history: Vec<HistoryEntry> = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("history.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].industry, "hollywood");
        assert_eq!(history[0].genre, "drama");
        assert_eq!(history[0].movie_type.as_deref(), Some("Top Rated"));
        assert_eq!(history[0].recommended, result.movies);
    }

    #[test]
    fn test_catalog_write_failure_keeps_memory_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("log.txt"));
        // the catalog "file" is a directory, so loading and saving both fail
        let mut engine = Recommender::open(
            JsonListFile::new(dir.path(), log.clone()),
            JsonListFile::new(dir.path().join("history.json"), log.clone()),
            JsonListFile::new(dir.path().join("ratings.json"), log),
            StdRng::seed_from_u64(1),
        );
        engine.catalog = Catalog::new(vec![Movie::new("A", "hollywood", &["drama"])]);

        let result = engine.recommend(Some("hollywood"), Some("drama"), None, 5);

        assert_eq!(result.movies.len(), 1);
        assert_eq!(engine.catalog().get("A").unwrap().popularity, 6);
        let log_contents = std::fs::read_to_string(dir.path().join("log.txt")).unwrap();
        assert!(log_contents.contains("Error writing to"));
    }

    #[test]
    fn test_rate_movie_validates_and_appends() {
        let (dir, mut engine) = setup(&[]);

        assert!(engine.rate_movie("Heat", 0).is_err());
        assert!(engine.rate_movie("Heat", 6).is_err());
        assert!(engine.rate_movie("Heat", -1).is_err());
        assert!(!dir.path().join("ratings.json").exists());

        let entry = engine.rate_movie("  Heat ", 4).unwrap();
        assert_eq!(entry.title, "Heat");
        assert_eq!(entry.stars, 4);

        let ratings: Vec<RatingEntry> = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("ratings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(ratings, vec![entry]);
    }

    #[test]
    fn test_same_seed_same_recommendation() {
        let movies: Vec<Movie> = (0..15)
            .map(|i| Movie::new(format!("Movie {}", i), "hollywood", &["drama"]))
            .collect();

        let (_a_dir, a) = setup(&movies);
        let (_b_dir, b) = setup(&movies);
        let mut a = a.with_seed(123);
        let mut b = b.with_seed(123);

        let first = a.recommend(Some("hollywood"), Some("drama"), None, 3);
        let second = b.recommend(Some("hollywood"), Some("drama"), None, 3);

        assert_eq!(first, second);
    }
}
