use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fanout::{ActivationId, Executor, ExecutorConfig};

#[derive(Debug, Parser)]
pub struct App {
    /// Number of input elements to map over.
    #[clap(short, long, default_value = "4")]
    pub count: i64,

    /// Worker threads in the pool. Defaults to available parallelism.
    #[clap(short, long)]
    pub workers: Option<usize>,
}

fn my_function(id: ActivationId, x: i64) -> i64 {
    tracing::info!("I'm activation number {}", id);
    x + 7
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<ExitCode> {
    let args = App::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fanout=debug,cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ExecutorConfig::default();
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let executor = Executor::new(config)?;

    let iterdata = 1..=args.count;
    let handle = executor.map_fn(my_function, iterdata)?;

    println!("{:?}", handle.get_result().await?);

    Ok(ExitCode::SUCCESS)
}
