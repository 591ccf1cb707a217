mod activity;
mod catalog;
mod movie;
mod movie_type;

pub use activity::{HistoryEntry, RatingEntry};
pub(crate) use activity::now_seconds;
pub use catalog::Catalog;
pub use movie::{Movie, ScoredMovie};
pub use movie_type::MovieType;
