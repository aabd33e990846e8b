//! Interactive play session on top of [`Board`].
use crate::engine::{Board, Move};

/// Manages one play-through of a puzzle: the current board, the moves
/// played so far and the history needed to undo them.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Board, Palette};
/// use ballsort_solver::game::Game;
///
/// let palette = Palette::new(["R", "B"]).unwrap();
/// let board = Board::new(palette, 2, [vec!["R", "B"], vec!["R"], vec!["B"]]).unwrap();
/// let mut game = Game::new_with_board(board);
///
/// assert!(!game.process_move(1, 0)); // tube 0 is full
/// assert!(game.process_move(0, 2));
/// assert!(game.process_move(0, 1));
/// assert!(game.is_solved());
///
/// assert!(game.undo_last_move());
/// assert_eq!(game.steps(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: Vec<Board>,
    moves: Vec<Move>,
}

impl Game {
    pub fn new_with_board(initial_board: Board) -> Self {
        Game {
            board: initial_board,
            history: Vec::new(),
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played so far, 0-based.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn steps(&self) -> usize {
        self.moves.len()
    }

    /// Plays a move if it is legal.
    ///
    /// # Returns
    /// * `true` if the move was applied.
    /// * `false` if either index is out of range or the move breaks the
    ///   legality rule; the board is left unchanged.
    pub fn process_move(&mut self, source: usize, destination: usize) -> bool {
        let mv = Move::new(source, destination);
        if !self.board.is_legal(mv) {
            return false;
        }
        let next = self.board.apply_move(mv);
        self.history.push(std::mem::replace(&mut self.board, next));
        self.moves.push(mv);
        true
    }

    /// Reverts the last move. Returns `false` if nothing has been played.
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.board = previous;
                self.moves.pop();
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// True when the puzzle is unsolved and no legal move remains.
    pub fn is_stuck(&self) -> bool {
        !self.is_solved() && self.board.moves().is_empty()
    }
}
