//! Audio Feature Fetcher - batched feature lookup keyed by track uri.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{AudioFeatures, Track};
use crate::providers::AudioFeatureApi;

/// Fetch audio features for every distinct track uri.
///
/// Uris are requested in batches of at most `batch_size` (further capped by
/// the provider's own limit), one batch at a time. Uris the provider doesn't
/// recognise are simply absent from the output. Any error aborts the run.
pub async fn fetch_features(
    api: &dyn AudioFeatureApi,
    tracks: &[Track],
    batch_size: usize,
) -> Result<Vec<AudioFeatures>> {
    let uris = distinct_uris(tracks);
    let batch_size = batch_size.min(api.max_batch_size()).max(1);

    let mut features = Vec::with_capacity(uris.len());
    for (i, batch) in uris.chunks(batch_size).enumerate() {
        debug!(batch = i + 1, size = batch.len(), "Requesting audio features");
        features.extend(api.get_features(batch).await?);
    }

    info!(
        requested = uris.len(),
        returned = features.len(),
        "Fetched audio features"
    );
    Ok(features)
}

/// Track uris in first-appearance order, without repeats.
fn distinct_uris(tracks: &[Track]) -> Vec<String> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .filter(|t| seen.insert(t.track_uri.as_str()))
        .map(|t| t.track_uri.clone())
        .collect()
}
