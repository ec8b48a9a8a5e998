//! Asynchronous classification requests against a species model.

use crate::constants::DEFAULT_MAX_RESULTS;
use crate::error::{Error, Result};
use crate::inference::{PreparedImage, SourceImage};
use crate::species::{ClassificationBatch, ClassificationResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use tracing::{debug, trace};

/// A pretrained image classifier.
///
/// Implementations return one entry per known species, in any order. The
/// adapter ranks and truncates the output.
pub trait SpeciesModel: Send + Sync + 'static {
    /// Score every known species for the given image.
    fn predict(&self, image: &PreparedImage) -> Result<Vec<ClassificationResult>>;
}

/// Identifier of one classification request. Later requests have larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw id value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ranked guesses delivered for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutcome {
    /// Request that produced this batch.
    pub request_id: RequestId,
    /// Guesses, highest confidence first.
    pub batch: ClassificationBatch,
}

/// A classification running in the background.
///
/// The result is delivered at most once; awaiting [`wait`](Self::wait)
/// consumes the handle.
#[derive(Debug)]
pub struct PendingClassification {
    request_id: RequestId,
    receiver: oneshot::Receiver<Result<ClassificationBatch>>,
}

impl PendingClassification {
    /// Id assigned to this request.
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Wait for the background worker to finish.
    pub async fn wait(self) -> Result<ClassificationOutcome> {
        let batch = self
            .receiver
            .await
            .map_err(|_| Error::ClassificationChannelClosed)??;

        Ok(ClassificationOutcome {
            request_id: self.request_id,
            batch,
        })
    }
}

/// Runs classification requests off the caller's task.
pub struct ClassifierAdapter<M> {
    model: Arc<M>,
    max_results: usize,
    last_issued: AtomicU64,
}

impl<M: SpeciesModel> ClassifierAdapter<M> {
    /// Wrap a model, keeping the default number of guesses per request.
    pub fn new(model: M) -> Self {
        Self::with_max_results(model, DEFAULT_MAX_RESULTS)
    }

    /// Wrap a model, keeping at most `max_results` guesses per request.
    pub fn with_max_results(model: M, max_results: usize) -> Self {
        Self {
            model: Arc::new(model),
            max_results,
            last_issued: AtomicU64::new(0),
        }
    }

    /// Underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Start classifying an image.
    ///
    /// Image and orientation problems are reported here, before any work is
    /// scheduled. Must be called from within a tokio runtime.
    pub fn classify(&self, image: SourceImage) -> Result<PendingClassification> {
        let prepared = image.prepare()?;

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| Error::Internal {
            message: format!("classification requires a tokio runtime: {e}"),
        })?;

        let request_id = RequestId(self.last_issued.fetch_add(1, Ordering::SeqCst) + 1);
        let (sender, receiver) = oneshot::channel();
        let model = Arc::clone(&self.model);
        let max_results = self.max_results;

        debug!(
            "Classification {request_id}: {}x{} image queued",
            prepared.width(),
            prepared.height()
        );

        runtime.spawn_blocking(move || {
            let result = model
                .predict(&prepared)
                .and_then(|scores| rank_output(scores, max_results));

            if sender.send(result).is_err() {
                trace!("Classification {request_id}: receiver dropped before delivery");
            }
        });

        Ok(PendingClassification {
            request_id,
            receiver,
        })
    }

    /// Id of the most recently started request, if any.
    pub fn latest_request_id(&self) -> Option<RequestId> {
        match self.last_issued.load(Ordering::SeqCst) {
            0 => None,
            id => Some(RequestId(id)),
        }
    }

    /// Whether `id` belongs to the most recently started request.
    ///
    /// Results for older requests can be discarded by the caller.
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest_request_id() == Some(id)
    }
}

fn rank_output(
    scores: Vec<ClassificationResult>,
    max_results: usize,
) -> Result<ClassificationBatch> {
    if let Some(bad) = scores
        .iter()
        .find(|r| !r.confidence.is_finite() || !(0.0..=1.0).contains(&r.confidence))
    {
        return Err(Error::ModelOutput {
            reason: format!(
                "confidence {} for '{}' is outside [0, 1]",
                bad.confidence, bad.label
            ),
        });
    }

    Ok(ClassificationBatch::ranked(scores, max_results))
}
