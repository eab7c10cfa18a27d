use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, Scope, ScopedJoinHandle};

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("worker pool needs at least one worker")]
    NoWorkers,
    #[error("failed to spawn worker thread {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("task queue closed before submission")]
    Disconnected,
    #[error("{count} submitted task(s) panicked")]
    TaskPanicked { count: usize },
    #[error("worker thread panicked")]
    WorkerPanicked,
}

/// A unit of work borrowed from the enclosing scope.
type Task<'env> = Box<dyn FnOnce() + Send + 'env>;

/// Outstanding-task counter backing the completion barrier.
#[derive(Default)]
struct CompletionTracker {
    state: Mutex<TrackerState>,
    idle: Condvar,
}

#[derive(Default)]
struct TrackerState {
    pending: usize,
    panicked: usize,
}

impl CompletionTracker {
    fn started(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.pending += 1;
    }

    fn finished(&self, panicked: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.pending -= 1;
        if panicked {
            state.panicked += 1;
        }
        if state.pending == 0 {
            self.idle.notify_all();
        }
    }

    /// Blocks until nothing is pending; returns and resets the panic count.
    fn wait_idle(&self) -> usize {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.pending > 0 {
            state = self
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        std::mem::take(&mut state.panicked)
    }
}

/// Fixed-size set of threads draining a shared FIFO of tasks.
///
/// Workers live inside a [`std::thread::scope`], so submitted tasks may
/// borrow anything that outlives the scope (the snapshot and disjoint views
/// of the live picture). Submission never blocks; [`WorkerPool::wait`] is the
/// completion barrier and [`WorkerPool::shutdown`] joins the workers.
pub struct WorkerPool<'scope, 'env: 'scope> {
    sender: Option<Sender<Task<'env>>>,
    workers: Vec<ScopedJoinHandle<'scope, ()>>,
    tracker: Arc<CompletionTracker>,
}

impl<'scope, 'env> WorkerPool<'scope, 'env> {
    pub fn new(scope: &'scope Scope<'scope, 'env>, size: usize) -> Result<Self, PoolError> {
        if size == 0 {
            return Err(PoolError::NoWorkers);
        }

        let (sender, receiver) = crossbeam_channel::unbounded::<Task<'env>>();
        let tracker = Arc::new(CompletionTracker::default());

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let receiver = receiver.clone();
            let tracker = Arc::clone(&tracker);
            let handle = thread::Builder::new()
                .name(format!("blur-worker-{index}"))
                .spawn_scoped(scope, move || worker_loop(receiver, &tracker))
                .map_err(|source| PoolError::Spawn { index, source })?;
            workers.push(handle);
        }

        Ok(Self {
            sender: Some(sender),
            workers,
            tracker,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queues a task for the next idle worker.
    pub fn submit<F>(&self, task: F) -> Result<(), PoolError>
    where
        F: FnOnce() + Send + 'env,
    {
        let sender = self.sender.as_ref().ok_or(PoolError::Disconnected)?;
        self.tracker.started();
        if sender.send(Box::new(task)).is_err() {
            self.tracker.finished(false);
            return Err(PoolError::Disconnected);
        }
        Ok(())
    }

    /// Blocks until every submitted task has run.
    pub fn wait(&self) -> Result<(), PoolError> {
        match self.tracker.wait_idle() {
            0 => Ok(()),
            count => Err(PoolError::TaskPanicked { count }),
        }
    }

    /// Closes the queue and joins every worker.
    pub fn shutdown(mut self) -> Result<(), PoolError> {
        drop(self.sender.take());
        let mut result = Ok(());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                result = Err(PoolError::WorkerPanicked);
            }
        }
        result
    }
}

fn worker_loop(receiver: Receiver<Task<'_>>, tracker: &CompletionTracker) {
    for task in receiver {
        let outcome = panic::catch_unwind(AssertUnwindSafe(task));
        if outcome.is_err() {
            log::warn!(
                "Task panicked on {}",
                thread::current().name().unwrap_or("worker")
            );
        }
        tracker.finished(outcome.is_err());
    }
}

/// Runs `f` against a fresh pool of `size` workers, then waits for every
/// submitted task and tears the pool down before returning.
///
/// The barrier runs even when `f` fails part-way, so tasks already queued
/// never outlive the borrowed data. The first error wins.
pub fn with_pool<'env, F>(size: usize, f: F) -> Result<(), PoolError>
where
    F: for<'scope> FnOnce(&WorkerPool<'scope, 'env>) -> Result<(), PoolError>,
{
    thread::scope(|scope| {
        let pool = WorkerPool::new(scope, size)?;
        let submitted = f(&pool);
        let waited = pool.wait();
        let joined = pool.shutdown();
        submitted.and(waited).and(joined)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_workers_rejected() {
        let result = with_pool(0, |_| Ok(()));
        assert!(matches!(result, Err(PoolError::NoWorkers)));
    }

    #[test]
    fn test_pool_size_matches_request() {
        thread::scope(|scope| {
            let pool = WorkerPool::new(scope, 3).unwrap();
            assert_eq!(pool.size(), 3);
            pool.shutdown().unwrap();
        });
    }

    #[test]
    fn test_every_task_runs_exactly_once() {
        let counter = AtomicUsize::new(0);
        with_pool(4, |pool| {
            for _ in 0..1000 {
                pool.submit(|| {
                    counter.fetch_add(1, Ordering::Relaxed);
                })?;
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 1000);
    }

    #[test]
    fn test_wait_is_a_barrier() {
        let counter = AtomicUsize::new(0);
        thread::scope(|scope| {
            let pool = WorkerPool::new(scope, 2).unwrap();
            for _ in 0..50 {
                pool.submit(|| {
                    thread::sleep(std::time::Duration::from_micros(100));
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
            }
            pool.wait().unwrap();
            assert_eq!(counter.load(Ordering::SeqCst), 50);
            pool.shutdown().unwrap();
        });
    }

    #[test]
    fn test_tasks_can_borrow_disjoint_slices() {
        let mut data = vec![0u32; 64];
        with_pool(4, |pool| {
            for (i, chunk) in data.chunks_mut(8).enumerate() {
                pool.submit(move || chunk.fill(i as u32))?;
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(data[0], 0);
        assert_eq!(data[63], 7);
    }

    #[test]
    fn test_panicking_task_reported_by_wait() {
        let counter = AtomicUsize::new(0);
        let result = with_pool(2, |pool| {
            pool.submit(|| panic!("boom"))?;
            for _ in 0..10 {
                pool.submit(|| {
                    counter.fetch_add(1, Ordering::Relaxed);
                })?;
            }
            Ok(())
        });
        assert!(matches!(result, Err(PoolError::TaskPanicked { count: 1 })));
        assert_eq!(counter.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_wait_with_nothing_submitted_returns() {
        with_pool(1, |pool| pool.wait()).unwrap();
    }
}
