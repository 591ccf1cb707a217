use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The engine; recommendations and ratings take the write lock, so there
    /// is exactly one writer to the backing files at a time
    pub recommender: Arc<RwLock<Recommender>>,
    /// Result size when a request does not specify one
    pub default_top_n: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, default_top_n: usize) -> Self {
        Self {
            recommender: Arc::new(RwLock::new(recommender)),
            default_top_n,
        }
    }
}
