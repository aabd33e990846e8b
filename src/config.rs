//! Tuning knobs for the two search strategies.
//!
//! Defaults reproduce the reference behaviour: progress every 10,000
//! expansions; deepening from depth 8 in steps of 5 up to 50, seeding work
//! items at depth 3 with four items per worker on at most 24 workers.
use crate::error::ConfigError;
use std::thread;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;
pub const DEFAULT_INITIAL_DEPTH: usize = 8;
pub const DEFAULT_DEPTH_STEP: usize = 5;
pub const DEFAULT_MAX_DEPTH: usize = 50;
pub const DEFAULT_SEED_DEPTH: usize = 3;
pub const DEFAULT_ITEMS_PER_WORKER: usize = 4;
pub const DEFAULT_MAX_WORKERS: usize = 24;

/// Settings for the exhaustive breadth-first strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of node expansions between two progress reports.
    pub progress_interval: u64,
    /// Nodes at this depth are not expanded. `None` searches until the
    /// frontier is exhausted.
    pub max_depth: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_depth: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_interval == 0 {
            return Err(ConfigError::ZeroProgressInterval);
        }
        Ok(())
    }
}

/// Settings for the partitioned iterative-deepening strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeepeningConfig {
    /// Depth budget of the first round.
    pub initial_depth: usize,
    /// Budget increase between rounds.
    pub depth_step: usize,
    /// Rounds stop once the budget exceeds this value.
    pub max_depth: usize,
    /// Depth of the shallow breadth-first pass that produces work items.
    pub seed_depth: usize,
    /// Work items requested per worker.
    pub items_per_worker: usize,
    /// Explicit worker count. `None` uses the available parallelism,
    /// capped at `max_workers`.
    pub workers: Option<usize>,
    pub max_workers: usize,
}

impl Default for DeepeningConfig {
    fn default() -> Self {
        DeepeningConfig {
            initial_depth: DEFAULT_INITIAL_DEPTH,
            depth_step: DEFAULT_DEPTH_STEP,
            max_depth: DEFAULT_MAX_DEPTH,
            seed_depth: DEFAULT_SEED_DEPTH,
            items_per_worker: DEFAULT_ITEMS_PER_WORKER,
            workers: None,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl DeepeningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_depth == 0 {
            return Err(ConfigError::ZeroInitialDepth);
        }
        if self.depth_step == 0 {
            return Err(ConfigError::ZeroDepthStep);
        }
        if self.initial_depth > self.max_depth {
            return Err(ConfigError::InitialDepthAboveMax {
                initial: self.initial_depth,
                max: self.max_depth,
            });
        }
        if self.items_per_worker == 0 {
            return Err(ConfigError::ZeroItemsPerWorker);
        }
        if self.workers == Some(0) || self.max_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Number of workers the pool is built with.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(workers) => workers,
            None => thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(self.max_workers),
        }
    }

    /// Frontier size at which the shallow pass stops splitting.
    pub fn target_batch(&self) -> usize {
        self.worker_count() * self.items_per_worker
    }
}
