use thiserror::Error;

use crate::executor::ActivationId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Executor is stopped and no longer accepts activations")]
    ExecutorStopped,

    #[error("Activation {0} failed: {1}")]
    ActivationFailed(ActivationId, #[source] anyhow::Error),

    #[error("Activation {0} was lost before producing a result")]
    ActivationLost(ActivationId),

    #[error("Timed out waiting for job results")]
    ResultTimeout,

    #[error("Serde JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::InvalidConfig("worker count must be non-zero");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: worker count must be non-zero"
        );

        let error = Error::ActivationFailed(3, anyhow::anyhow!("division by zero"));
        assert_eq!(error.to_string(), "Activation 3 failed: division by zero");

        let error = Error::ActivationLost(0);
        assert_eq!(
            error.to_string(),
            "Activation 0 was lost before producing a result"
        );

        let error = Error::IO(std::io::Error::new(std::io::ErrorKind::Other, "test"));
        assert_eq!(error.to_string(), "IO error: test");
    }
}
