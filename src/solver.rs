use crate::canonical::VisitedSet;
use crate::config::SearchConfig;
use crate::engine::{Board, Move};
use crate::error::ConfigError;
use crate::progress::{NoProgress, Progress, ProgressObserver};
use crate::solution::{SearchStats, Solution};
use std::collections::VecDeque;
use std::time::Instant;

/// Result of one breadth-first run: the solved board and the path to it,
/// if any, plus the effort spent.
#[derive(Clone, Debug)]
pub struct SearchRun {
    pub found: Option<(Board, Vec<Move>)>,
    pub stats: SearchStats,
}

/// Solves `board` with an unbounded breadth-first search and no progress reporting.
///
/// The returned move list is the shortest one up to tube permutation. When
/// the frontier is exhausted the puzzle is unsolvable and `moves` is `None`.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Board, Palette};
/// use ballsort_solver::solver::solve_bfs;
///
/// let palette = Palette::new(["R", "B"]).unwrap();
/// let board = Board::from_top_down(palette, 2, [vec!["B", "R"], vec!["R", "B"], vec![], vec![]]).unwrap();
/// let solution = solve_bfs(&board);
/// assert_eq!(solution.moves.as_ref().map(Vec::len), Some(3));
/// assert!(solution.final_board.is_solved());
/// ```
pub fn solve_bfs(board: &Board) -> Solution {
    let run = breadth_first(board, None, 0, &mut NoProgress);
    into_solution(board, run)
}

/// Like [`solve_bfs`], reporting to `observer` every
/// `config.progress_interval` expansions and honouring `config.max_depth`.
pub fn solve_bfs_with(
    board: &Board,
    config: &SearchConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<Solution, ConfigError> {
    config.validate()?;
    let run = breadth_first(board, config.max_depth, config.progress_interval, observer);
    if let Some((_, moves)) = &run.found {
        log::info!(
            "solved in {} moves after expanding {} nodes",
            moves.len(),
            run.stats.expanded
        );
    } else {
        log::info!("no solution after expanding {} nodes", run.stats.expanded);
    }
    Ok(into_solution(board, run))
}

fn into_solution(board: &Board, run: SearchRun) -> Solution {
    match run.found {
        Some((final_board, moves)) => Solution::found(final_board, moves, run.stats),
        None => Solution::not_found(board.clone(), run.stats),
    }
}

/// Parent links for every generated node, so paths are shared rather than copied.
struct PathArena {
    links: Vec<(usize, Move)>,
}

impl PathArena {
    const ROOT: usize = usize::MAX;

    fn new() -> Self {
        PathArena { links: Vec::new() }
    }

    fn extend(&mut self, parent: usize, mv: Move) -> usize {
        self.links.push((parent, mv));
        self.links.len() - 1
    }

    fn path(&self, mut node: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        while node != Self::ROOT {
            let (parent, mv) = self.links[node];
            moves.push(mv);
            node = parent;
        }
        moves.reverse();
        moves
    }
}

struct Node {
    board: Board,
    id: usize,
    depth: usize,
}

/// Breadth-first search from `origin` with canonical deduplication.
///
/// Nodes at `max_depth` are not expanded. A `progress_interval` of 0
/// disables progress reports.
pub(crate) fn breadth_first(
    origin: &Board,
    max_depth: Option<usize>,
    progress_interval: u64,
    observer: &mut dyn ProgressObserver,
) -> SearchRun {
    let started = Instant::now();
    let mut stats = SearchStats::default();
    let mut visited = VisitedSet::seeded(origin);

    if origin.is_solved() {
        stats.visited = visited.len();
        stats.elapsed = started.elapsed();
        return SearchRun {
            found: Some((origin.clone(), Vec::new())),
            stats,
        };
    }

    let mut arena = PathArena::new();
    let mut frontier = VecDeque::new();
    frontier.push_back(Node {
        board: origin.clone(),
        id: PathArena::ROOT,
        depth: 0,
    });
    stats.peak_frontier = 1;

    while let Some(node) = frontier.pop_front() {
        if max_depth.is_some_and(|limit| node.depth >= limit) {
            continue;
        }
        stats.expanded += 1;
        if progress_interval > 0 && stats.expanded % progress_interval == 0 {
            observer.on_progress(&Progress {
                expanded: stats.expanded,
                frontier: frontier.len(),
                visited: visited.len(),
                peak_frontier: stats.peak_frontier,
                elapsed: started.elapsed(),
            });
        }

        for mv in node.board.moves() {
            let next = node.board.apply_move(mv);
            if !visited.insert(&next) {
                continue;
            }
            stats.generated += 1;
            let id = arena.extend(node.id, mv);

            if next.is_solved() {
                stats.visited = visited.len();
                stats.elapsed = started.elapsed();
                return SearchRun {
                    found: Some((next, arena.path(id))),
                    stats,
                };
            }
            frontier.push_back(Node {
                board: next,
                id,
                depth: node.depth + 1,
            });
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    stats.visited = visited.len();
    stats.elapsed = started.elapsed();
    SearchRun { found: None, stats }
}
