use listing_audit::config::AppConfig;
use listing_audit::error::AppError;
use listing_audit::listings::{ListingDataset, ListingDatasetLoader};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the snapshot named on the command line or in the environment. The
/// service still starts without one and serves an empty funnel.
pub(crate) fn load_served_dataset(
    config: &AppConfig,
    listings: Option<PathBuf>,
) -> Result<ListingDataset, AppError> {
    match listings.or_else(|| config.dataset.listings_path.clone()) {
        Some(path) => Ok(ListingDatasetLoader::from_path(path)?),
        None => {
            warn!("no listing snapshot configured; serving an empty dataset");
            Ok(ListingDataset::default())
        }
    }
}
