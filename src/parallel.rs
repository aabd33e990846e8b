//! Partitioned iterative-deepening search.
//!
//! Each round runs a shallow breadth-first pass from the origin, cuts its
//! frontier into [`WorkItem`]s and hands every item to an independent
//! worker on a rayon pool. A worker is a depth-bounded breadth-first search
//! with its own visited set; workers share nothing. The round is a barrier:
//! every item runs to completion before results are inspected, and the
//! first successful item in dispatch order wins. If none succeeds the
//! budget grows and the next round starts from scratch.
//!
//! Unlike [`crate::solver::solve_bfs`], the solution returned here is not
//! guaranteed to be the shortest: workers explore disjoint subtrees and
//! their results are not compared by length.
use crate::canonical::VisitedSet;
use crate::config::DeepeningConfig;
use crate::engine::{Board, Move};
use crate::error::SolveError;
use crate::progress::{NoProgress, ProgressObserver};
use crate::solution::{SearchStats, Solution};
use crate::solver::{breadth_first, SearchRun};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::VecDeque;
use std::time::Instant;

/// A unit of work for one worker: a board reached by `path` from the
/// origin, to be searched at most `budget` moves deeper.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub board: Board,
    pub path: Vec<Move>,
    pub budget: usize,
}

/// Output of the shallow pass.
#[derive(Clone, Debug)]
pub enum Partition {
    /// The shallow pass reached a solved board by itself.
    Solved { board: Board, path: Vec<Move> },
    /// Work items covering every state within the budget, up to tube
    /// permutation. Empty when the whole state space was exhausted.
    Items(Vec<WorkItem>),
}

/// Runs the shallow breadth-first pass for one round.
///
/// Expansion stops at `seed_depth` (kept below `depth_budget`) or once the
/// frontier holds `target_items` nodes, whichever comes first; every node
/// left on the frontier becomes a work item with budget
/// `depth_budget - depth`.
pub fn partition(
    origin: &Board,
    depth_budget: usize,
    seed_depth: usize,
    target_items: usize,
) -> Partition {
    if origin.is_solved() {
        return Partition::Solved {
            board: origin.clone(),
            path: Vec::new(),
        };
    }

    let seed_depth = seed_depth.min(depth_budget.saturating_sub(1));
    let mut visited = VisitedSet::seeded(origin);
    let mut queue: VecDeque<(Board, Vec<Move>)> = VecDeque::new();
    queue.push_back((origin.clone(), Vec::new()));

    while let Some((board, path)) = queue.pop_front() {
        if path.len() >= seed_depth || queue.len() + 1 >= target_items {
            queue.push_front((board, path));
            break;
        }
        for mv in board.moves() {
            let next = board.apply_move(mv);
            if !visited.insert(&next) {
                continue;
            }
            let mut next_path = path.clone();
            next_path.push(mv);
            if next.is_solved() {
                return Partition::Solved {
                    board: next,
                    path: next_path,
                };
            }
            queue.push_back((next, next_path));
        }
    }

    let items = queue
        .into_iter()
        .map(|(board, path)| WorkItem {
            budget: depth_budget.saturating_sub(path.len()),
            board,
            path,
        })
        .collect();
    Partition::Items(items)
}

/// Runs one work item to completion. A found path already includes the
/// item's prefix from the origin.
pub fn run_work_item(item: &WorkItem) -> SearchRun {
    let mut run = breadth_first(&item.board, Some(item.budget), 0, &mut NoProgress);
    if let Some((_, moves)) = run.found.as_mut() {
        let mut full_path = item.path.clone();
        full_path.append(moves);
        *moves = full_path;
    }
    log::trace!(
        "work item at depth {} with budget {}: expanded {}, solved {}",
        item.path.len(),
        item.budget,
        run.stats.expanded,
        run.found.is_some()
    );
    run
}

/// Solves `board` with the default [`DeepeningConfig`] and no progress reporting.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Board, Palette};
/// use ballsort_solver::parallel::solve_parallel;
/// use ballsort_solver::solution::replay;
///
/// let palette = Palette::new(["R", "B"]).unwrap();
/// let board = Board::from_top_down(palette, 2, [vec!["B", "R"], vec!["R", "B"], vec![], vec![]]).unwrap();
/// let solution = solve_parallel(&board).unwrap();
/// let moves = solution.moves.unwrap();
/// assert!(replay(&board, &moves).is_solved());
/// ```
pub fn solve_parallel(board: &Board) -> Result<Solution, SolveError> {
    solve_parallel_with(board, &DeepeningConfig::default(), &mut NoProgress)
}

/// Partitioned iterative-deepening search.
///
/// Returns `moves == None` when no round up to `config.max_depth` found a
/// solution; this does not prove the puzzle unsolvable unless the shallow
/// pass exhausted the state space.
pub fn solve_parallel_with(
    board: &Board,
    config: &DeepeningConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<Solution, SolveError> {
    config.validate()?;
    let started = Instant::now();
    let mut stats = SearchStats::default();

    let workers = config.worker_count();
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
    let target_items = config.target_batch();

    let mut depth_budget = config.initial_depth;
    while depth_budget <= config.max_depth {
        let items = match partition(board, depth_budget, config.seed_depth, target_items) {
            Partition::Solved { board: solved, path } => {
                stats.elapsed = started.elapsed();
                log::info!("solved during partitioning in {} moves", path.len());
                return Ok(Solution::found(solved, path, stats));
            }
            Partition::Items(items) => items,
        };
        if items.is_empty() {
            log::info!("state space exhausted while partitioning");
            break;
        }

        observer.on_deepen(depth_budget, items.len());
        log::debug!(
            "dispatching {} work items to {} workers at depth {}",
            items.len(),
            workers,
            depth_budget
        );
        let results: Vec<SearchRun> = pool.install(|| items.par_iter().map(run_work_item).collect());

        for run in &results {
            stats.absorb(&run.stats);
        }
        if let Some((solved, path)) = results.into_iter().find_map(|run| run.found) {
            stats.elapsed = started.elapsed();
            log::info!(
                "solved in {} moves at depth budget {}",
                path.len(),
                depth_budget
            );
            return Ok(Solution::found(solved, path, stats));
        }

        depth_budget += config.depth_step;
    }

    stats.elapsed = started.elapsed();
    log::info!("no solution found up to depth {}", config.max_depth);
    Ok(Solution::not_found(board.clone(), stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Palette;
    use crate::error::ConfigError;
    use crate::solution::replay;
    use crate::solver::solve_bfs;

    fn three_color_board() -> Board {
        let palette = Palette::new(["R", "G", "B"]).unwrap();
        Board::new(
            palette,
            3,
            [vec!["R", "G", "B"], vec!["G", "B", "R"], vec!["B", "R", "G"], vec![], vec![]],
        )
        .unwrap()
    }

    fn small_config() -> DeepeningConfig {
        DeepeningConfig {
            workers: Some(2),
            ..DeepeningConfig::default()
        }
    }

    #[test]
    fn test_partition_of_solved_board() {
        let palette = Palette::new(["R"]).unwrap();
        let board = Board::new(palette, 2, [vec!["R", "R"], vec![]]).unwrap();
        match partition(&board, 8, 3, 16) {
            Partition::Solved { path, .. } => assert!(path.is_empty()),
            Partition::Items(_) => panic!("solved board should not be partitioned"),
        }
    }

    #[test]
    fn test_partition_items_cover_seed_depth() {
        let board = three_color_board();
        let Partition::Items(items) = partition(&board, 8, 2, usize::MAX) else {
            panic!("no solution exists within two moves");
        };
        assert!(!items.is_empty());
        for item in &items {
            assert_eq!(item.path.len(), 2);
            assert_eq!(item.budget, 6);
            assert_eq!(replay(&board, &item.path), item.board);
        }
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert!(!a.board.equivalent_to(&b.board));
            }
        }
    }

    #[test]
    fn test_partition_stops_at_target_batch() {
        let board = three_color_board();
        let Partition::Items(items) = partition(&board, 8, 3, 1) else {
            panic!("unexpected solution");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].board, board);
        assert_eq!(items[0].budget, 8);
    }

    #[test]
    fn test_partition_returns_shallow_solution() {
        let palette = Palette::new(["R", "B"]).unwrap();
        let board =
            Board::from_top_down(palette, 2, [vec!["B", "R"], vec!["B"], vec!["R"], vec![]]).unwrap();
        match partition(&board, 8, 3, 64) {
            Partition::Solved { board: solved, path } => {
                assert_eq!(path.len(), 2);
                assert!(solved.is_solved());
            }
            Partition::Items(_) => panic!("two-move solution should be found while partitioning"),
        }
    }

    #[test]
    fn test_run_work_item_prefixes_path() {
        let board = three_color_board();
        let first = board.moves()[0];
        let item = WorkItem {
            board: board.apply_move(first),
            path: vec![first],
            budget: 20,
        };
        let run = run_work_item(&item);
        let (solved, moves) = run.found.unwrap();
        assert_eq!(moves[0], first);
        assert_eq!(replay(&board, &moves), solved);
        assert!(solved.is_solved());
    }

    #[test]
    fn test_solve_parallel_finds_sound_solution() {
        let board = three_color_board();
        let solution = solve_parallel_with(&board, &small_config(), &mut NoProgress).unwrap();
        let moves = solution.moves.clone().unwrap();
        assert!(moves.len() >= solve_bfs(&board).moves.unwrap().len());
        assert_eq!(replay(&board, &moves), solution.final_board);
        assert!(solution.final_board.is_solved());
    }

    #[test]
    fn test_solve_parallel_deepens_until_found() {
        let board = three_color_board();
        let config = DeepeningConfig {
            initial_depth: 2,
            depth_step: 2,
            max_depth: 20,
            ..small_config()
        };
        let mut rounds = Vec::new();
        let mut observer = Rounds(&mut rounds);
        let solution = solve_parallel_with(&board, &config, &mut observer).unwrap();
        // The shortest solution has 8 moves, so rounds 2, 4 and 6 fail and
        // round 8 finds a solution of exactly that length.
        assert_eq!(solution.moves.map(|m| m.len()), Some(8));
        assert_eq!(rounds, vec![2, 4, 6, 8]);
    }

    struct Rounds<'a>(&'a mut Vec<usize>);

    impl ProgressObserver for Rounds<'_> {
        fn on_progress(&mut self, _progress: &crate::progress::Progress) {}

        fn on_deepen(&mut self, depth: usize, _work_items: usize) {
            self.0.push(depth);
        }
    }

    #[test]
    fn test_solve_parallel_gives_up_at_max_depth() {
        let board = three_color_board();
        let config = DeepeningConfig {
            initial_depth: 3,
            depth_step: 2,
            max_depth: 7,
            ..small_config()
        };
        let solution = solve_parallel_with(&board, &config, &mut NoProgress).unwrap();
        assert!(solution.moves.is_none());
        assert_eq!(solution.final_board, board);
    }

    #[test]
    fn test_solve_parallel_without_moves() {
        let palette = Palette::new(["R", "B"]).unwrap();
        let board = Board::new(palette, 2, [vec!["R", "B"], vec!["B", "R"]]).unwrap();
        let solution = solve_parallel_with(&board, &small_config(), &mut NoProgress).unwrap();
        assert!(solution.moves.is_none());
    }

    #[test]
    fn test_solve_parallel_rejects_bad_config() {
        let board = three_color_board();
        let config = DeepeningConfig {
            depth_step: 0,
            ..small_config()
        };
        let result = solve_parallel_with(&board, &config, &mut NoProgress);
        assert!(matches!(
            result,
            Err(SolveError::Config(ConfigError::ZeroDepthStep))
        ));
    }
}
