pub mod cache;
pub mod client;
pub mod error;
pub mod types;

pub use cache::{clear_cache, get_cache_path, CacheConfig, ResponseCache};
pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AvailableModels, ModelAvailability, ModelComparison, PlayerHistory, PredictionRecord, RosterRecord, SeasonLine,
};
