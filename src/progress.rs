//! Progress observation for long-running searches.
//!
//! The search engine never prints. It hands a [`Progress`] snapshot to a
//! [`ProgressObserver`] at the configured cadence; what happens next is up
//! to the caller. Closures taking `&Progress` are observers too.
use std::time::Duration;

/// A snapshot of search effort so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Nodes taken off the frontier and expanded.
    pub expanded: u64,
    /// Nodes currently waiting on the frontier.
    pub frontier: usize,
    /// Distinct canonical keys seen.
    pub visited: usize,
    /// Largest frontier size seen so far.
    pub peak_frontier: usize,
    pub elapsed: Duration,
}

pub trait ProgressObserver {
    /// Called every `progress_interval` expansions by the exhaustive search.
    fn on_progress(&mut self, progress: &Progress);

    /// Called by the partitioned search before dispatching a round.
    fn on_deepen(&mut self, _depth: usize, _work_items: usize) {}
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// Forwards reports to the `log` facade at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, progress: &Progress) {
        log::info!(
            "expanded {} nodes, frontier {}, visited {}, peak frontier {}, {:.1}s elapsed",
            progress.expanded,
            progress.frontier,
            progress.visited,
            progress.peak_frontier,
            progress.elapsed.as_secs_f64()
        );
    }

    fn on_deepen(&mut self, depth: usize, work_items: usize) {
        log::info!("searching deeper: max depth {depth}, {work_items} work items");
    }
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress),
{
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer_receives_snapshots() {
        let mut seen = Vec::new();
        {
            let mut observer = |progress: &Progress| seen.push(progress.expanded);
            observer.on_progress(&Progress {
                expanded: 10,
                ..Progress::default()
            });
            observer.on_deepen(8, 4);
            observer.on_progress(&Progress {
                expanded: 20,
                ..Progress::default()
            });
        }
        assert_eq!(seen, vec![10, 20]);
    }

    #[test]
    fn test_builtin_observers_accept_reports() {
        let progress = Progress::default();
        NoProgress.on_progress(&progress);
        LogProgress.on_progress(&progress);
        LogProgress.on_deepen(13, 96);
    }
}
