//! # `fanout`
//!
//! `fanout` provides a map-and-collect executor: submit a user function
//! together with an ordered collection of inputs, run one activation per
//! element on a worker pool, and collect the outputs in input order.
//!
//! ## Example
//!
//! ```rust
//! use fanout::{Executor, ExecutorConfig};
//!
//! #[tokio::main]
//! async fn main() -> fanout::Result<()> {
//!     let executor = Executor::new(ExecutorConfig::default())?;
//!
//!     let iterdata = vec![1, 2, 3, 4];
//!     let handle = executor.map_fn(|_id, x: i64| x + 7, iterdata)?;
//!
//!     assert_eq!(handle.get_result().await?, vec![8, 9, 10, 11]);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod executor;

pub use config::ExecutorConfig;
pub use error::{Error, Result};
pub use executor::{
    ActivationId, CallHandle, CallHandler, Executor, FnCallHandler, JobId, MapHandle,
};
