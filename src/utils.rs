use crate::engine::{Board, Palette};
use crate::error::{BoardError, ParseError};
use std::sync::Arc;

/// Parses board text into a `Board`.
///
/// Each non-blank line describes one tube, listed **top first** the way a
/// player reads the puzzle off the screen. Tokens are color codes from
/// `palette`, separated by whitespace and/or commas.
///
/// - A line consisting of `-` or `.` is an empty tube.
/// - Blank lines and lines starting with `#` are ignored.
///
/// # Arguments
/// * `palette`: The alphabet every token must belong to.
/// * `capacity`: Tube capacity of the resulting board.
/// * `lines`: The lines of board text.
///
/// # Returns
/// * `Ok(Board)` with tubes in line order.
/// * `Err(ParseError::Board)` naming the 1-based line of an unknown color or
///   an overfull tube.
/// * `Err(ParseError::NoTubes)` if no line describes a tube.
///
/// # Examples
/// ```
/// use ballsort_solver::engine::Palette;
/// use ballsort_solver::utils::board_from_lines;
///
/// let lines = [
///     "# two reds and two blues",
///     "B R",
///     "R, B",
///     "-",
///     "-",
/// ];
/// let board = board_from_lines(Palette::new(["R", "B"]).unwrap(), 2, &lines).unwrap();
/// assert_eq!(board.to_list(), vec!["RB", "BR", "", ""]);
///
/// assert!(board_from_lines(Palette::new(["R", "B"]).unwrap(), 2, &["R G"]).is_err());
/// ```
pub fn board_from_lines<S: AsRef<str>>(
    palette: impl Into<Arc<Palette>>,
    capacity: usize,
    lines: &[S],
) -> Result<Board, ParseError> {
    let mut tubes: Vec<Vec<&str>> = Vec::new();
    let mut line_numbers = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.as_ref().trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let tokens = if trimmed == "-" || trimmed == "." {
            Vec::new()
        } else {
            trimmed
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty())
                .collect()
        };
        tubes.push(tokens);
        line_numbers.push(index + 1);
    }

    if tubes.is_empty() {
        return Err(ParseError::NoTubes);
    }

    Board::from_top_down(palette, capacity, tubes).map_err(|error| match error {
        BoardError::InvalidColor { tube, .. } | BoardError::TubeOverflow { tube, .. } => {
            ParseError::Board {
                line: line_numbers[tube],
                source: error,
            }
        }
        other => ParseError::Invalid(other),
    })
}

/// Parses a whole board file. See [`board_from_lines`] for the format.
pub fn board_from_str(
    palette: impl Into<Arc<Palette>>,
    capacity: usize,
    text: &str,
) -> Result<Board, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    board_from_lines(palette, capacity, &lines)
}
