use crossbeam::channel::{unbounded, Receiver, Sender};
use std::thread::JoinHandle;
use uuid::Uuid;

use crate::error::{Error, Result};

pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Pool command
pub(crate) enum Command {
    Invoke(Job),
    Stop,
}

/// Fixed-size pool of worker threads draining a shared command channel.
pub(crate) struct WorkerPool {
    tx: Sender<Command>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidConfig("worker count must be non-zero"));
        }

        // Create channel
        let (tx, rx) = unbounded();

        let workers = (0..workers)
            .map(|_| spawn_worker(rx.clone()))
            .collect::<std::io::Result<Vec<_>>>()?;

        Ok(Self { tx, workers })
    }

    pub fn submit(&self, job: Job) -> Result<()> {
        self.tx
            .send(Command::Invoke(job))
            .map_err(|_| Error::ExecutorStopped)
    }
}

fn spawn_worker(rx: Receiver<Command>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name(format!("worker-{}", Uuid::new_v4()))
        .spawn(move || worker_loop(rx))
}

// Pull commands off the channel and run them until stopped.
fn worker_loop(rx: Receiver<Command>) {
    'main: while let Ok(cmd) = rx.recv() {
        use Command::*;

        match cmd {
            Invoke(job) => job(),
            Stop => {
                tracing::trace!("Stopping worker");
                break 'main;
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // One stop per worker; commands queued earlier drain first.
        for _ in &self.workers {
            let _ = self.tx.send(Command::Stop);
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::error!("Worker thread panicked during shutdown");
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_submit() {
        let pool = WorkerPool::new(2).unwrap();

        let (tx, rx) = mpsc::channel();
        pool.submit(Box::new(move || {
            tx.send(41 + 1).unwrap();
        }))
        .unwrap();

        assert_eq!(rx.recv().unwrap(), 42);
    }

    #[test]
    fn test_drop_drains_pending_jobs() {
        let pool = WorkerPool::new(1).unwrap();

        let (tx, rx) = mpsc::channel();
        for i in 0..4 {
            let tx = tx.clone();
            pool.submit(Box::new(move || {
                tx.send(i).unwrap();
            }))
            .unwrap();
        }
        drop(pool);

        let received: Vec<i32> = rx.try_iter().collect();
        assert_eq!(received, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(Error::InvalidConfig(_))
        ));
    }
}
