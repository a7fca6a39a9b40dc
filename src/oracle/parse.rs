//! Extraction of a cell index from free-form oracle text.

use super::OracleParseError;
use tracing::{debug, instrument};

/// Returns the first run of ASCII digits in `text`, parsed as an index.
///
/// A run directly preceded by `-` is a negative number and yields `None`.
pub fn first_integer(text: &str) -> Option<usize> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    if text[..start].ends_with('-') {
        return None;
    }
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Parses a move proposal, accepting it only if it names a legal cell.
#[instrument(skip(legal_moves))]
pub fn parse_move(text: &str, legal_moves: &[usize]) -> Result<usize, OracleParseError> {
    match first_integer(text) {
        Some(index) if legal_moves.contains(&index) => {
            debug!(index, "Accepted move proposal");
            Ok(index)
        }
        other => {
            debug!(parsed = ?other, "Rejected move proposal");
            Err(OracleParseError::new(text))
        }
    }
}
