pub mod cascade;
pub mod catalog_queries;
pub mod normalize;
pub mod ratings;
pub mod recommendations;
pub mod scoring;

pub use cascade::{MatchStage, Query};
pub use ratings::{RatingError, Stars};
pub use recommendations::{Recommendation, Recommender};
