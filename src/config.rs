use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON array of movie records, rewritten after every recommendation
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// JSON array of recommendation history entries
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// JSON array of user ratings
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Append-only text log of absorbed storage errors
    #[serde(default = "default_error_log_path")]
    pub error_log_path: PathBuf,

    /// Number of movies returned when a request does not ask for a count
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Fixed seed for scoring and sampling; entropy-seeded when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("movies.json")
}

fn default_history_path() -> PathBuf {
    PathBuf::from("history.json")
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("ratings.json")
}

fn default_error_log_path() -> PathBuf {
    PathBuf::from("log.txt")
}

fn default_top_n() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            history_path: default_history_path(),
            ratings_path: default_ratings_path(),
            error_log_path: default_error_log_path(),
            default_top_n: default_top_n(),
            rng_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of `KEY=value` pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
