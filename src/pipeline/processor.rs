//! Single image processing pipeline.

use crate::error::{Error, Result};
use crate::inference::{ClassifierAdapter, SourceImage, SpeciesModel};
use crate::output::ImageReport;
use crate::species::FormatPolicy;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Decode, classify and describe a single image.
///
/// Decoding runs on the blocking pool; classification goes through the
/// adapter so it never blocks the calling task.
pub async fn process_image<M: SpeciesModel>(
    input_path: &Path,
    adapter: &ClassifierAdapter<M>,
    policy: &FormatPolicy,
) -> Result<ImageReport> {
    let start_time = Instant::now();
    info!("Processing: {}", input_path.display());

    let path = input_path.to_path_buf();
    let image = tokio::task::spawn_blocking(move || SourceImage::open(&path))
        .await
        .map_err(|e| Error::Internal {
            message: format!("image decoder task failed: {e}"),
        })??;

    let pending = adapter.classify(image)?;
    let request_id = pending.request_id();
    let outcome = pending.wait().await?;

    let description = policy.format(&outcome.batch);
    debug!(
        "Classification {request_id} finished in {:.2}s with {} guesses",
        start_time.elapsed().as_secs_f64(),
        outcome.batch.len()
    );

    Ok(ImageReport {
        file_path: input_path.to_path_buf(),
        request_id: outcome.request_id,
        batch: outcome.batch,
        description,
    })
}
