//! Sequential and parallel scheduling of per-album work.
//!
//! A [`Schedule`] is chosen once per run. Stages that fan out per album
//! hand their work items to [`Schedule::run_all`], which returns every
//! item's result once the whole stage is done (stage barrier).

use std::future::Future;
use std::num::NonZeroUsize;
use std::str::FromStr;

use futures::{StreamExt, stream};
use tokio::runtime::{Builder, Runtime};

use crate::error::Error;

/// How the caller asked for per-album work to be spread out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyStrategy {
    /// One worker per available CPU
    Default,
    /// Force one-at-a-time execution even when parallel is requested
    Sequential,
    /// Fixed worker count
    Workers(NonZeroUsize),
}

impl FromStr for ConcurrencyStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "sequential" => Ok(Self::Sequential),
            other => other
                .parse::<NonZeroUsize>()
                .map(Self::Workers)
                .map_err(|_| {
                    Error::invalid_input(format!(
                        "unknown concurrency strategy '{}' (expected \"default\", \"sequential\" or a worker count)",
                        s
                    ))
                }),
        }
    }
}

impl ConcurrencyStrategy {
    /// Resolve into a concrete schedule.
    pub fn schedule(self, parallel: bool) -> Schedule {
        if !parallel {
            return Schedule::Sequential;
        }
        match self {
            Self::Default => Schedule::Parallel {
                workers: default_workers(),
            },
            Self::Sequential => Schedule::Sequential,
            Self::Workers(n) => Schedule::Parallel { workers: n.get() },
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Concrete scheduling mode for one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Sequential,
    Parallel { workers: usize },
}

impl Schedule {
    pub fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel { .. })
    }

    /// Run `task` for every item and return the results in input order.
    ///
    /// Parallel mode keeps up to `workers` tasks in flight; they may finish
    /// in any order. Each result is tagged with its item's index and the
    /// union is reassembled after the last one completes.
    pub async fn run_all<I, T, F, Fut>(self, items: Vec<I>, task: F) -> Vec<T>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = T>,
    {
        match self {
            Self::Sequential => {
                let mut results = Vec::with_capacity(items.len());
                for item in items {
                    results.push(task(item).await);
                }
                results
            }
            Self::Parallel { workers } => {
                let task = &task;
                let mut tagged: Vec<(usize, T)> = stream::iter(items.into_iter().enumerate())
                    .map(|(index, item)| async move { (index, task(item).await) })
                    .buffer_unordered(workers.max(1))
                    .collect()
                    .await;
                tagged.sort_by_key(|(index, _)| *index);
                tagged.into_iter().map(|(_, result)| result).collect()
            }
        }
    }

    /// Build the runtime that hosts one blocking pipeline invocation.
    ///
    /// The runtime is owned by the caller and shut down when dropped.
    pub fn runtime(self) -> std::io::Result<Runtime> {
        match self {
            Self::Sequential => Builder::new_current_thread().enable_all().build(),
            Self::Parallel { workers } => Builder::new_multi_thread()
                .worker_threads(workers.max(1))
                .thread_name("album-data-worker")
                .enable_all()
                .build(),
        }
    }
}
