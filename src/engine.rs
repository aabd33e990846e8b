//! Core puzzle model for the ball sort puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Palette` and `Color`: the finite alphabet of token colors a board is built from.
//! - `Tube`: a capacity-bounded stack of colors (last element is the top).
//! - `Move`: a 0-based `(source, destination)` tube pair.
//! - `Board`: the tubes of one puzzle state, with move generation, move
//!   application, the solved check and canonicalization.
use crate::canonical::CanonicalKey;
use crate::error::{BoardError, PaletteError};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Tube capacity used by every reference puzzle.
pub const DEFAULT_CAPACITY: usize = 4;

/// Largest number of colors a palette can hold (colors are stored as `u8`).
pub const MAX_COLORS: usize = 256;

/// The reference alphabet: two-letter code and human readable name.
pub const STANDARD_COLORS: [(&str, &str); 15] = [
    ("Re", "Red"),
    ("Or", "Orange"),
    ("Ye", "Yellow"),
    ("LG", "Light Green"),
    ("BG", "Bright Green"),
    ("DG", "Dark Green"),
    ("Cy", "Cyan"),
    ("LB", "Light Blue"),
    ("DB", "Dark Blue"),
    ("Pu", "Purple"),
    ("Ma", "Magenta"),
    ("Pi", "Pink"),
    ("Wh", "White"),
    ("Gr", "Grey"),
    ("Bl", "Black"),
];

/// A token color, identified by its position in a [`Palette`].
///
/// Colors are only meaningful relative to the palette that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(u8);

impl Color {
    /// Returns the position of this color in its palette.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The finite alphabet of color codes a board may contain.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::Palette;
///
/// let palette = Palette::new(["R", "B"]).unwrap();
/// let red = palette.lookup("R").unwrap();
/// assert_eq!(palette.code(red), "R");
/// assert!(palette.lookup("G").is_none());
/// assert_eq!(Palette::standard().len(), 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    codes: Vec<String>,
}

impl Palette {
    /// Builds a palette from distinct, non-empty codes.
    ///
    /// Codes may not contain whitespace or commas, since those separate
    /// tokens in the board text format.
    pub fn new<I, S>(codes: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.is_empty() {
            return Err(PaletteError::Empty);
        }
        if codes.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors {
                max: MAX_COLORS,
                found: codes.len(),
            });
        }
        for (index, code) in codes.iter().enumerate() {
            if code.is_empty() {
                return Err(PaletteError::EmptyCode { index });
            }
            if code.chars().any(|c| c.is_whitespace() || c == ',') {
                return Err(PaletteError::InvalidCode { code: code.clone() });
            }
            if codes[..index].contains(code) {
                return Err(PaletteError::DuplicateCode { code: code.clone() });
            }
        }
        Ok(Palette { codes })
    }

    /// The 15-color reference palette (see [`STANDARD_COLORS`]).
    pub fn standard() -> Self {
        Palette {
            codes: STANDARD_COLORS
                .iter()
                .map(|(code, _)| code.to_string())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Resolves a code to its color, or `None` if the code is not part of this palette.
    pub fn lookup(&self, code: &str) -> Option<Color> {
        self.codes
            .iter()
            .position(|c| c == code)
            .map(|index| Color(index as u8))
    }

    /// Returns the code of `color`.
    ///
    /// # Panics
    /// Panics if `color` did not come from this palette.
    pub fn code(&self, color: Color) -> &str {
        &self.codes[color.index()]
    }

    /// Iterates over every color of the palette in declaration order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.codes.len()).map(|index| Color(index as u8))
    }
}

/// A move of the top token of tube `source` onto tube `destination`.
///
/// Indices are 0-based; see [`crate::solution::NumberedMove`] for the
/// 1-based form shown to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: usize,
    pub destination: usize,
}

impl Move {
    pub fn new(source: usize, destination: usize) -> Self {
        Move {
            source,
            destination,
        }
    }
}

/// A bounded stack of colors, stored bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tube {
    tokens: Vec<Color>,
}

impl Tube {
    pub fn from_colors(tokens: Vec<Color>) -> Self {
        Tube { tokens }
    }

    /// Tokens from bottom to top.
    pub fn tokens(&self) -> &[Color] {
        &self.tokens
    }

    /// The only accessible token, if any.
    pub fn top(&self) -> Option<Color> {
        self.tokens.last().copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when every token has the same color (vacuously true when empty).
    pub fn is_uniform(&self) -> bool {
        self.tokens.windows(2).all(|pair| pair[0] == pair[1])
    }
}

/// One puzzle state: a fixed, ordered list of tubes sharing one capacity.
///
/// Boards are values. [`Board::apply_move`] returns a new board and never
/// mutates `self`. Equality compares tube contents position by position;
/// use [`Board::equivalent_to`] to ignore tube order.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::{Board, Move, Palette};
///
/// let palette = Palette::new(["R", "B"]).unwrap();
/// // Tubes listed top first, as a player reads them off the screen.
/// let board = Board::from_top_down(palette, 2, [vec!["B", "R"], vec!["R", "B"], vec![], vec![]]).unwrap();
/// assert_eq!(board.to_list(), vec!["RB", "BR", "", ""]);
/// assert!(!board.is_solved());
///
/// let next = board.apply_move(Move::new(0, 2));
/// assert_eq!(next.to_list(), vec!["R", "BR", "B", ""]);
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    tubes: Vec<Tube>,
    capacity: usize,
    palette: Arc<Palette>,
}

impl Board {
    /// Builds a board from tubes given bottom first as color codes.
    ///
    /// # Errors
    /// * `BoardError::ZeroCapacity` if `capacity` is 0.
    /// * `BoardError::InvalidColor` if a code is not in `palette`.
    /// * `BoardError::TubeOverflow` if a tube holds more than `capacity` tokens.
    pub fn new<T, S>(
        palette: impl Into<Arc<Palette>>,
        capacity: usize,
        tubes: impl IntoIterator<Item = T>,
    ) -> Result<Self, BoardError>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let palette = palette.into();
        let mut resolved = Vec::new();
        for (tube_index, tube) in tubes.into_iter().enumerate() {
            let mut tokens = Vec::new();
            for code in tube {
                let code = code.as_ref();
                let color = palette.lookup(code).ok_or_else(|| BoardError::InvalidColor {
                    code: code.to_string(),
                    tube: tube_index,
                })?;
                tokens.push(color);
            }
            resolved.push(tokens);
        }
        Board::from_colors(palette, capacity, resolved)
    }

    /// Builds a board from tubes listed top first, reversing each tube into
    /// the bottom-first internal order.
    pub fn from_top_down<T, S>(
        palette: impl Into<Arc<Palette>>,
        capacity: usize,
        tubes: impl IntoIterator<Item = T>,
    ) -> Result<Self, BoardError>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reversed: Vec<Vec<S>> = tubes
            .into_iter()
            .map(|tube| {
                let mut tokens: Vec<S> = tube.into_iter().collect();
                tokens.reverse();
                tokens
            })
            .collect();
        Board::new(palette, capacity, reversed)
    }

    /// Builds a board from already-resolved colors, bottom first.
    pub fn from_colors(
        palette: impl Into<Arc<Palette>>,
        capacity: usize,
        tubes: Vec<Vec<Color>>,
    ) -> Result<Self, BoardError> {
        let palette = palette.into();
        if capacity == 0 {
            return Err(BoardError::ZeroCapacity);
        }
        for (tube_index, tube) in tubes.iter().enumerate() {
            if let Some(stray) = tube.iter().find(|color| color.index() >= palette.len()) {
                return Err(BoardError::InvalidColor {
                    code: format!("#{}", stray.index()),
                    tube: tube_index,
                });
            }
            if tube.len() > capacity {
                return Err(BoardError::TubeOverflow {
                    tube: tube_index,
                    len: tube.len(),
                    capacity,
                });
            }
        }
        Ok(Board {
            tubes: tubes.into_iter().map(Tube::from_colors).collect(),
            capacity,
            palette,
        })
    }

    /// Deals `colors` full sets of tokens into `colors` full tubes in a
    /// shuffled order, followed by `empty_tubes` empty tubes.
    ///
    /// The same seed always produces the same board. The result is not
    /// guaranteed to be solvable.
    pub fn new_random_with_seed(
        palette: impl Into<Arc<Palette>>,
        colors: usize,
        capacity: usize,
        empty_tubes: usize,
        seed: u64,
    ) -> Result<Self, BoardError> {
        let palette = palette.into();
        if capacity == 0 {
            return Err(BoardError::ZeroCapacity);
        }
        if colors > palette.len() {
            return Err(BoardError::NotEnoughColors {
                requested: colors,
                available: palette.len(),
            });
        }
        let mut tokens: Vec<Color> = palette
            .colors()
            .take(colors)
            .flat_map(|color| std::iter::repeat(color).take(capacity))
            .collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        tokens.shuffle(&mut rng);

        let mut tubes: Vec<Vec<Color>> = tokens.chunks(capacity).map(<[Color]>::to_vec).collect();
        tubes.extend(std::iter::repeat_with(Vec::new).take(empty_tubes));
        Board::from_colors(palette, capacity, tubes)
    }

    /// Returns a copy of this board with `count` empty tubes appended.
    pub fn with_empty_tubes(&self, count: usize) -> Board {
        let mut board = self.clone();
        board
            .tubes
            .extend(std::iter::repeat_with(Tube::default).take(count));
        board
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// # Panics
    /// Panics if `index` is out of range.
    pub fn tube(&self, index: usize) -> &Tube {
        &self.tubes[index]
    }

    pub fn tube_count(&self) -> usize {
        self.tubes.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The palette handle, for building sibling boards that share it.
    pub fn shared_palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Checks the puzzle's only legality rule: distinct tubes, non-empty
    /// source, destination below capacity, and destination either empty or
    /// topped by the source's top color.
    pub fn is_legal(&self, mv: Move) -> bool {
        if mv.source == mv.destination
            || mv.source >= self.tubes.len()
            || mv.destination >= self.tubes.len()
        {
            return false;
        }
        let Some(moving) = self.tubes[mv.source].top() else {
            return false;
        };
        let destination = &self.tubes[mv.destination];
        destination.len() < self.capacity && destination.top().map_or(true, |top| top == moving)
    }

    /// Every legal move, ordered by source tube then destination tube.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (source, from_tube) in self.tubes.iter().enumerate() {
            let Some(moving) = from_tube.top() else {
                continue;
            };
            for (destination, to_tube) in self.tubes.iter().enumerate() {
                if source == destination || to_tube.len() >= self.capacity {
                    continue;
                }
                if to_tube.top().map_or(true, |top| top == moving) {
                    moves.push(Move::new(source, destination));
                }
            }
        }
        moves
    }

    /// Returns the board reached by playing `mv`.
    ///
    /// # Panics
    /// Panics if `mv` is not legal on this board. Callers must only apply
    /// moves produced by [`Board::moves`] or checked with [`Board::is_legal`].
    pub fn apply_move(&self, mv: Move) -> Board {
        assert!(self.is_legal(mv), "illegal move {:?} on board:\n{}", mv, self);
        let mut next = self.clone();
        if let Some(token) = next.tubes[mv.source].tokens.pop() {
            next.tubes[mv.destination].tokens.push(token);
        }
        next
    }

    /// Total number of tokens of each color, indexed by [`Color::index`].
    pub fn color_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for tube in &self.tubes {
            for color in tube.tokens() {
                counts[color.index()] += 1;
            }
        }
        counts
    }

    /// True iff every tube is empty or completely filled with one color, and
    /// every color present appears exactly `capacity` times on the board.
    pub fn is_solved(&self) -> bool {
        let tubes_sorted = self
            .tubes
            .iter()
            .all(|tube| tube.is_empty() || (tube.len() == self.capacity && tube.is_uniform()));
        tubes_sorted
            && self
                .color_counts()
                .iter()
                .all(|&count| count == 0 || count == self.capacity)
    }

    /// The order-independent signature used to deduplicate search states.
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::of(self)
    }

    /// True iff `other` is a tube permutation of this board.
    pub fn equivalent_to(&self, other: &Board) -> bool {
        self.canonical_key() == other.canonical_key()
    }

    /// One string per tube, token codes concatenated bottom to top.
    pub fn to_list(&self) -> Vec<String> {
        self.tubes
            .iter()
            .map(|tube| {
                tube.tokens()
                    .iter()
                    .map(|&color| self.palette.code(color))
                    .collect()
            })
            .collect()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.tubes == other.tubes
            && (Arc::ptr_eq(&self.palette, &other.palette) || self.palette == other.palette)
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.capacity.hash(state);
        self.tubes.hash(state);
    }
}

impl fmt::Display for Board {
    /// One line per tube: its 1-based number, then the codes bottom to top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tube) in self.tubes.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>2} |", index + 1)?;
            for &color in tube.tokens() {
                write!(f, " {}", self.palette.code(color))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_color_palette() -> Arc<Palette> {
        Arc::new(Palette::new(["R", "B"]).unwrap())
    }

    fn board(tubes: &[&[&str]], capacity: usize) -> Board {
        Board::new(two_color_palette(), capacity, tubes.iter().map(|t| t.iter().copied())).unwrap()
    }

    #[test]
    fn test_palette_rejects_bad_codes() {
        assert_eq!(Palette::new(Vec::<String>::new()), Err(PaletteError::Empty));
        assert_eq!(
            Palette::new(["R", "R"]),
            Err(PaletteError::DuplicateCode { code: "R".into() })
        );
        assert_eq!(Palette::new(["R", ""]), Err(PaletteError::EmptyCode { index: 1 }));
        assert_eq!(
            Palette::new(["L B"]),
            Err(PaletteError::InvalidCode { code: "L B".into() })
        );
        let too_many: Vec<String> = (0..=MAX_COLORS).map(|i| format!("c{}", i)).collect();
        assert!(matches!(
            Palette::new(too_many),
            Err(PaletteError::TooManyColors { .. })
        ));
    }

    #[test]
    fn test_standard_palette_codes() {
        let palette = Palette::standard();
        assert_eq!(palette.len(), STANDARD_COLORS.len());
        for (code, _) in STANDARD_COLORS {
            let color = palette.lookup(code).unwrap();
            assert_eq!(palette.code(color), code);
        }
        assert!(palette.lookup("Xx").is_none());
    }

    #[test]
    fn test_new_rejects_invalid_color() {
        let result = Board::new(two_color_palette(), 2, [vec!["R"], vec!["G"]]);
        assert_eq!(
            result.unwrap_err(),
            BoardError::InvalidColor {
                code: "G".into(),
                tube: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_overflow_and_zero_capacity() {
        let result = Board::new(two_color_palette(), 2, [vec!["R", "R", "B"]]);
        assert_eq!(
            result.unwrap_err(),
            BoardError::TubeOverflow {
                tube: 0,
                len: 3,
                capacity: 2
            }
        );
        let result = Board::new(two_color_palette(), 0, [Vec::<&str>::new()]);
        assert_eq!(result.unwrap_err(), BoardError::ZeroCapacity);
    }

    #[test]
    fn test_from_colors_rejects_foreign_color() {
        let palette = two_color_palette();
        let foreign = Palette::standard().lookup("Bl").unwrap();
        let result = Board::from_colors(palette, 4, vec![vec![foreign]]);
        assert!(matches!(result, Err(BoardError::InvalidColor { tube: 0, .. })));
    }

    #[test]
    fn test_from_top_down_reverses_tubes() {
        let top_down =
            Board::from_top_down(two_color_palette(), 3, [vec!["R", "B", "B"], vec![]]).unwrap();
        assert_eq!(top_down, board(&[&["B", "B", "R"], &[]], 3));
        let red = top_down.palette().lookup("R").unwrap();
        assert_eq!(top_down.tube(0).top(), Some(red));
    }

    #[test]
    fn test_moves_follow_legality_rule() {
        // Tube 0 top R, tube 1 top B, tube 2 full, tube 3 empty.
        let b = board(&[&["B", "R"], &["R", "B"], &["R", "R"], &[]], 2);
        let moves = b.moves();
        assert_eq!(
            moves,
            vec![Move::new(0, 3), Move::new(1, 3), Move::new(2, 3)]
        );
        for mv in &moves {
            assert_ne!(mv.source, mv.destination);
            let destination = b.tube(mv.destination);
            assert!(destination.len() < b.capacity());
            assert!(destination.is_empty() || destination.top() == b.tube(mv.source).top());
        }
    }

    #[test]
    fn test_moves_onto_matching_top() {
        let b = board(&[&["B", "R"], &["R"], &[]], 3);
        let moves = b.moves();
        assert!(moves.contains(&Move::new(0, 1)));
        assert!(moves.contains(&Move::new(1, 0)));
        assert!(moves.contains(&Move::new(0, 2)));
        assert!(moves.contains(&Move::new(1, 2)));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_no_moves_when_full_with_distinct_tops() {
        let b = board(&[&["R", "B"], &["B", "R"]], 2);
        assert!(b.moves().is_empty());
    }

    #[test]
    fn test_is_legal_rejects_out_of_range_and_same_tube() {
        let b = board(&[&["R"], &[]], 2);
        assert!(b.is_legal(Move::new(0, 1)));
        assert!(!b.is_legal(Move::new(0, 0)));
        assert!(!b.is_legal(Move::new(1, 0)));
        assert!(!b.is_legal(Move::new(0, 5)));
    }

    #[test]
    fn test_apply_move_returns_new_board() {
        let b = board(&[&["B", "R"], &["R"], &[]], 2);
        let next = b.apply_move(Move::new(0, 1));
        assert_eq!(next.to_list(), vec!["B", "RR", ""]);
        assert_eq!(b.to_list(), vec!["BR", "R", ""]);
    }

    #[test]
    #[should_panic(expected = "illegal move")]
    fn test_apply_illegal_move_panics() {
        let b = board(&[&["B", "R"], &["R", "B"]], 2);
        b.apply_move(Move::new(0, 1));
    }

    #[test]
    fn test_moves_conserve_color_counts() {
        let b = Board::new_random_with_seed(Palette::standard(), 5, 4, 2, 7).unwrap();
        let counts = b.color_counts();
        for mv in b.moves() {
            assert_eq!(b.apply_move(mv).color_counts(), counts);
        }
    }

    #[test]
    fn test_is_solved() {
        assert!(board(&[&["R", "R"], &["B", "B"], &[]], 2).is_solved());
        assert!(board(&[&[], &[]], 2).is_solved());
        assert!(!board(&[&["R", "B"], &["B", "R"], &[]], 2).is_solved());
        // Partially filled uniform tube is not solved.
        assert!(!board(&[&["R"], &["R"], &["B", "B"]], 2).is_solved());
    }

    #[test]
    fn test_is_solved_requires_capacity_count_per_color() {
        // Two full red tubes: each tube is complete but red appears 4 times.
        assert!(!board(&[&["R", "R"], &["R", "R"]], 2).is_solved());
    }

    #[test]
    fn test_equivalence_ignores_tube_order() {
        let a = board(&[&["R", "B"], &["B"], &[]], 2);
        let b = board(&[&[], &["R", "B"], &["B"]], 2);
        let c = board(&[&["B"], &[], &["R", "B"]], 2);
        let different = board(&[&["B", "R"], &["B"], &[]], 2);

        assert!(a.equivalent_to(&a));
        assert!(a.equivalent_to(&b) && b.equivalent_to(&a));
        assert!(b.equivalent_to(&c) && a.equivalent_to(&c));
        assert!(!a.equivalent_to(&different));
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_random_with_seed_is_deterministic() {
        let first = Board::new_random_with_seed(Palette::standard(), 6, 4, 2, 514514).unwrap();
        let second = Board::new_random_with_seed(Palette::standard(), 6, 4, 2, 514514).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.tube_count(), 8);
        assert!(first.tubes()[..6].iter().all(|tube| tube.len() == 4));
        assert!(first.tubes()[6..].iter().all(Tube::is_empty));
        assert!(first.color_counts()[..6].iter().all(|&n| n == 4));
        assert!(first.color_counts()[6..].iter().all(|&n| n == 0));
    }

    #[test]
    fn test_new_random_with_seed_checks_palette_size() {
        let result = Board::new_random_with_seed(two_color_palette(), 3, 4, 1, 0);
        assert_eq!(
            result.unwrap_err(),
            BoardError::NotEnoughColors {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_with_empty_tubes() {
        let b = board(&[&["R", "R"]], 2).with_empty_tubes(2);
        assert_eq!(b.to_list(), vec!["RR", "", ""]);
    }

    #[test]
    fn test_display_board_formatting() {
        let b = board(&[&["R", "B"], &[]], 2);
        assert_eq!(format!("{}", b), " 1 | R B\n 2 |");
    }
}
