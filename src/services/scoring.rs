//! Weighted, jittered movie scoring.

use rand::Rng;

use crate::models::{Movie, ScoredMovie};

const RATING_WEIGHT: f64 = 0.6;
const POPULARITY_WEIGHT: f64 = 0.4;

/// Scores a movie as `0.6 * rating + 0.4 * popularity + U`, `U ~ [0, 1)`,
/// rounded to two decimals.
///
/// The jitter is drawn fresh on every call, so scoring the same movie twice
/// generally gives different results. Ranking variety across calls depends
/// on this.
pub fn score_movie<R: Rng>(movie: &Movie, rng: &mut R) -> f64 {
    let base = RATING_WEIGHT * movie.rating + POPULARITY_WEIGHT * movie.popularity as f64;
    let jitter: f64 = rng.gen_range(0.0..1.0);
    round2(base + jitter)
}

/// Pairs each movie with a freshly drawn score, keeping input order
pub fn score_all<'a, R, I>(movies: I, rng: &mut R) -> Vec<ScoredMovie>
where
    R: Rng,
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .map(|movie| ScoredMovie {
            movie: movie.clone(),
            score: score_movie(movie, rng),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn movie(rating: f64, popularity: i64) -> Movie {
        Movie {
            rating,
            popularity,
            ..Movie::new("Probe", "hollywood", &["drama"])
        }
    }

    #[test]
    fn test_score_stays_within_jitter_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = movie(9.0, 10);
        // base = 5.4 + 4.0
        for _ in 0..200 {
            let score = score_movie(&m, &mut rng);
            assert!((9.4..=10.4).contains(&score), "score {} out of band", score);
        }
    }

    #[test]
    fn test_score_has_two_decimals() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let score = score_movie(&movie(7.3, 6), &mut rng);
            let scaled = score * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_same_seed_gives_same_scores() {
        let m = movie(8.1, 7);
        let a: Vec<f64> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..5).map(|_| score_movie(&m, &mut rng)).collect()
        };
        let b: Vec<f64> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..5).map(|_| score_movie(&m, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_repeated_scoring_varies() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = movie(8.0, 8);
        let scores: Vec<f64> = (0..20).map(|_| score_movie(&m, &mut rng)).collect();
        assert!(scores.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_score_all_keeps_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let movies = vec![
            Movie::new("First", "", &[]),
            Movie::new("Second", "", &[]),
        ];
        let scored = score_all(&movies, &mut rng);
        assert_eq!(scored[0].movie.title, "First");
        assert_eq!(scored[1].movie.title, "Second");
    }
}
