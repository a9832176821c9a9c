use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, ModelComparison};
use crate::players::{combine_records, ModelType, PlayerStatRecord};
use crate::scoring::StatCategory;

/// Fetch the roster and one model's predictions concurrently and join them.
///
/// Called from main.rs for the scripted commands and from the TUI event loop
/// on model change or manual refresh.
pub async fn fetch_player_records(client: &ApiClient, model: ModelType) -> Result<Vec<PlayerStatRecord>, ApiError> {
    let (roster, predictions) = tokio::try_join!(client.players(), client.predictions(model))?;
    debug!(
        model = %model,
        roster = roster.len(),
        predictions = predictions.len(),
        "fetched player data"
    );
    Ok(combine_records(&roster, &predictions, model))
}

/// Per-model averages for several categories, in the order given.
///
/// Categories whose request fails are logged and left out. Fails only when
/// every request fails.
pub async fn fetch_model_comparison(
    client: &ApiClient,
    categories: &[StatCategory],
) -> Result<Vec<(StatCategory, ModelComparison)>, ApiError> {
    let mut futures = FuturesUnordered::new();
    for category in categories {
        let category = *category;
        futures.push(async move { (category, client.model_comparison(category).await) });
    }

    let mut results = Vec::new();
    let mut last_error = None;
    while let Some((category, result)) = futures.next().await {
        match result {
            Ok(comparison) => results.push((category, comparison)),
            Err(e) => {
                warn!(category = %category, error = %e, "model comparison failed");
                last_error = Some(e);
            }
        }
    }

    if results.is_empty() {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    // Restore the caller's order
    results.sort_by_key(|(category, _)| categories.iter().position(|c| c == category));
    Ok(results)
}
