use crate::engine::check_size;
use crate::error::PuzzleError;

/// Strips a trailing `#` comment from a line.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parses the puzzle text format into a side length and a row-major tile list.
///
/// The format is a first line holding the side length N, followed by exactly N
/// lines of N whitespace-separated integers. A `#` starts a comment that runs to
/// the end of its line, and blank (or comment-only) lines are ignored anywhere.
///
/// Structure and tile range are checked here; duplicate values are left to
/// `Board::from_tiles`.
///
/// # Arguments
/// * `input`: The full puzzle text.
///
/// # Returns
/// * `Ok((size, tiles))` if the text is well formed.
/// * `Err(PuzzleError::Format)` if:
///     - There is no size line, or it is not a positive integer.
///     - The number of rows differs from N.
///     - A row does not hold exactly N tokens.
///     - A token is not an integer.
/// * `Err(PuzzleError::InvalidPermutation)` if a tile lies outside `0..N²`.
/// * `Err(PuzzleError::TooLarge)` if N² does not fit the tile type.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::parse_board;
///
/// let text = "# a generated puzzle\n2\n1 2\n\n0 3 # blank in the corner\n";
/// let (size, tiles) = parse_board(text).unwrap();
/// assert_eq!(size, 2);
/// assert_eq!(tiles, vec![1, 2, 0, 3]);
///
/// assert!(parse_board("2\n1 2\n").is_err());
/// assert!(parse_board("2\n1 x\n0 3\n").is_err());
/// ```
pub fn parse_board(input: &str) -> Result<(usize, Vec<u16>), PuzzleError> {
    let mut lines = input
        .lines()
        .map(|l| strip_comment(l).trim())
        .filter(|l| !l.is_empty());

    let size_line = lines
        .next()
        .ok_or_else(|| PuzzleError::Format("Missing puzzle size line".to_string()))?;
    let size: usize = size_line
        .parse()
        .map_err(|_| PuzzleError::Format(format!("Invalid puzzle size: {}", size_line)))?;
    check_size(size)?;

    let rows: Vec<&str> = lines.collect();
    if rows.len() != size {
        return Err(PuzzleError::Format(format!(
            "Expected a puzzle of {} lines, got {}",
            size,
            rows.len()
        )));
    }

    let cells = (size * size) as i64;
    let mut tiles = Vec::with_capacity(size * size);
    for (r, row) in rows.iter().enumerate() {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() != size {
            return Err(PuzzleError::Format(format!(
                "Row {} has {} tiles (expected {})",
                r,
                tokens.len(),
                size
            )));
        }
        for token in tokens {
            let value: i64 = token
                .parse()
                .map_err(|_| PuzzleError::Format(format!("Invalid number: {}", token)))?;
            if !(0..cells).contains(&value) {
                return Err(PuzzleError::InvalidPermutation(format!(
                    "tile {} is out of range 0..{}",
                    value, cells
                )));
            }
            tiles.push(value as u16);
        }
    }
    Ok((size, tiles))
}

/// Renders tiles in the canonical text form accepted by `parse_board`.
///
/// Every cell is left-aligned and padded to the width of the widest value.
pub fn format_board(size: usize, tiles: &[u16]) -> String {
    let width = tiles
        .iter()
        .max()
        .map_or(1, |max| max.to_string().len());

    let mut output = format!("{}\n", size);
    for row in tiles.chunks(size) {
        let cells: Vec<String> = row
            .iter()
            .map(|tile| format!("{:<width$}", tile, width = width))
            .collect();
        output.push_str(cells.join(" ").trim_end());
        output.push('\n');
    }
    output
}
