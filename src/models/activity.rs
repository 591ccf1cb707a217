use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use super::ScoredMovie;

/// Current local time truncated to whole seconds
pub(crate) fn now_seconds() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// One recommendation call as recorded in the history file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: NaiveDateTime,
    /// Normalized industry
    pub industry: String,
    /// Normalized genre
    pub genre: String,
    /// Movie type exactly as the caller supplied it
    pub movie_type: Option<String>,
    /// Full snapshots of the movies returned to the caller
    pub recommended: Vec<ScoredMovie>,
}

/// A user's star rating for one title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingEntry {
    pub title: String,
    pub stars: u8,
    pub time: NaiveDateTime,
}
