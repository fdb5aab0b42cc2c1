mod handler;
mod job;
mod pool;

pub use handler::{CallHandler, FnCallHandler};
pub use job::{ActivationId, JobId};

use futures_util::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::config::ExecutorConfig;
use crate::error::{Error, Result};
use crate::executor::job::Activation;
use crate::executor::pool::WorkerPool;

/// Client handle bound to an in-process worker pool.
///
/// One logical activation is submitted per input element; results are
/// collected per activation over dedicated reply channels and assembled in
/// submission order, so completion order never leaks into the output.
pub struct Executor {
    pool: WorkerPool,
    task_timeout: Option<Duration>,
}

impl Executor {
    pub fn new(config: ExecutorConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.workers)?;

        tracing::info!("Executor started with {} workers", config.workers);

        Ok(Self {
            pool,
            task_timeout: config.task_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Submit one activation per input element. Returns immediately with a
    /// handle to the pending job; an empty input collection yields a job
    /// with zero activations.
    pub fn map<H>(
        &self,
        handler: H,
        inputs: impl IntoIterator<Item = H::Input>,
    ) -> Result<MapHandle<H::Output>>
    where
        H: CallHandler,
    {
        let job_id = Uuid::new_v4();
        let handler = Arc::new(handler);

        let mut receivers = Vec::new();
        for (id, input) in inputs.into_iter().enumerate() {
            let (tx, rx) = oneshot::channel();
            let activation = Activation::new(job_id, id, input, tx);
            let handler = Arc::clone(&handler);

            self.pool
                .submit(Box::new(move || run_activation(activation, handler)))?;

            receivers.push(rx);
        }

        tracing::debug!(
            "Submitted job {} with {} activations",
            job_id,
            receivers.len()
        );

        Ok(MapHandle {
            job_id,
            receivers,
            timeout: self.task_timeout,
        })
    }

    /// [`Executor::map`] for a plain closure or fn.
    pub fn map_fn<F, T, R>(
        &self,
        op: F,
        inputs: impl IntoIterator<Item = T>,
    ) -> Result<MapHandle<R>>
    where
        F: Fn(ActivationId, T) -> R + Send + Sync + 'static,
        T: Send + 'static,
        R: Send + 'static,
    {
        self.map(FnCallHandler::from(op), inputs)
    }

    /// Submit a single activation.
    pub fn call_async<H>(&self, handler: H, input: H::Input) -> Result<CallHandle<H::Output>>
    where
        H: CallHandler,
    {
        let inner = self.map(handler, std::iter::once(input))?;
        Ok(CallHandle { inner })
    }
}

// Runs on a pool worker; the reply travels back over the activation's
// oneshot channel.
fn run_activation<H>(activation: Activation<H::Input, H::Output>, handler: Arc<H>)
where
    H: CallHandler,
{
    tracing::trace!(
        "Processing activation {} of job {}, queued {}ms ago",
        activation.id,
        activation.job_id,
        activation.queue_time.elapsed().as_millis()
    );

    let response = handler.handle(activation.id, activation.input);

    if activation.response_tx.send(response).is_err() {
        tracing::error!(
            "Result receiver for activation {} of job {} dropped",
            activation.id,
            activation.job_id
        );
    }
}

/// Pending results of one map job.
#[must_use = "a map handle does nothing unless results are collected"]
pub struct MapHandle<R> {
    job_id: JobId,
    receivers: Vec<oneshot::Receiver<anyhow::Result<R>>>,
    timeout: Option<Duration>,
}

impl<R> MapHandle<R> {
    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Number of activations submitted for this job.
    pub fn activations(&self) -> usize {
        self.receivers.len()
    }

    /// Wait until every activation of the job has completed and return
    /// their outputs, ordered to correspond with the input collection.
    pub async fn get_result(self) -> Result<Vec<R>> {
        let futures = self
            .receivers
            .into_iter()
            .enumerate()
            .map(|(id, rx)| async move {
                match rx.await {
                    Ok(Ok(output)) => Ok(output),
                    Ok(Err(err)) => Err(Error::ActivationFailed(id, err)),
                    Err(_) => Err(Error::ActivationLost(id)),
                }
            });
        let collect = try_join_all(futures);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, collect)
                .await
                .map_err(|_| Error::ResultTimeout)?,
            None => collect.await,
        }
    }
}

/// Pending result of a single activation.
#[must_use = "a call handle does nothing unless the result is collected"]
pub struct CallHandle<R> {
    inner: MapHandle<R>,
}

impl<R> CallHandle<R> {
    pub fn job_id(&self) -> JobId {
        self.inner.job_id()
    }

    pub async fn get_result(self) -> Result<R> {
        let mut outputs = self.inner.get_result().await?;
        outputs.pop().ok_or(Error::ActivationLost(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TaskProcessor;

    impl CallHandler for TaskProcessor {
        type Input = String;
        type Output = String;

        fn handle(&self, _id: ActivationId, request: String) -> anyhow::Result<String> {
            Ok(format!("{}-processed", request))
        }
    }

    #[tokio::test]
    async fn test_map() {
        let executor = Executor::new(ExecutorConfig::default()).unwrap();

        let inputs = vec!["a".to_string(), "b".to_string()];
        let handle = executor.map(TaskProcessor, inputs).unwrap();
        assert_eq!(handle.activations(), 2);

        let response = handle.get_result().await.unwrap();
        assert_eq!(response, vec!["a-processed", "b-processed"]);
    }

    #[tokio::test]
    async fn test_call_async() {
        let executor = Executor::new(ExecutorConfig::default()).unwrap();

        let handle = executor.call_async(TaskProcessor, "task".to_string()).unwrap();

        let response = handle.get_result().await.unwrap();
        assert_eq!(response, "task-processed");
    }

    struct FallibleProcessor;

    impl CallHandler for FallibleProcessor {
        type Input = i64;
        type Output = i64;

        fn handle(&self, _id: ActivationId, input: i64) -> anyhow::Result<i64> {
            if input < 0 {
                anyhow::bail!("negative input");
            }
            Ok(input)
        }
    }

    #[tokio::test]
    async fn test_handler_error_carries_activation_id() {
        let executor = Executor::new(ExecutorConfig::default()).unwrap();

        let handle = executor.map(FallibleProcessor, vec![1, 2, -3]).unwrap();

        match handle.get_result().await {
            Err(Error::ActivationFailed(id, _)) => assert_eq!(id, 2),
            other => panic!("expected activation failure, got {:?}", other.map(|_| ())),
        }
    }
}
