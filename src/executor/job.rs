use tokio::sync::oneshot;
use tokio::time::Instant;
use uuid::Uuid;

/// Identifier of one map job.
pub type JobId = Uuid;

/// Identifier of a single activation within a job: the zero-based
/// submission index of its input element, assigned by the executor.
pub type ActivationId = usize;

/// One queued activation.
pub(crate) struct Activation<T, R> {
    /// Job this activation belongs to
    pub job_id: JobId,

    /// Identifier
    pub id: ActivationId,

    /// Input element
    pub input: T,

    /// Response sender
    pub response_tx: oneshot::Sender<anyhow::Result<R>>,

    /// Instant when this entry was queued
    pub queue_time: Instant,
}

impl<T, R> Activation<T, R> {
    pub fn new(
        job_id: JobId,
        id: ActivationId,
        input: T,
        response_tx: oneshot::Sender<anyhow::Result<R>>,
    ) -> Self {
        Self {
            job_id,
            id,
            input,
            response_tx,
            queue_time: Instant::now(),
        }
    }
}
