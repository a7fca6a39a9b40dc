//! Oracle error types.

use derive_more::{Display, Error, From};

/// Why an oracle call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum OracleErrorKind {
    /// The request never reached the service or the connection dropped.
    Transport,
    /// The call did not finish within the configured timeout.
    Timeout,
    /// The service answered with an error or an unusable body.
    Service,
    /// No oracle is configured.
    Unavailable,
}

/// Failure of a single oracle call.
#[derive(Debug, Clone, Display, Error)]
#[display("Oracle error ({}): {} at {}:{}", kind, message, file, line)]
pub struct OracleError {
    /// Failure category.
    pub kind: OracleErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new oracle error with caller location tracking.
    #[track_caller]
    pub fn new(kind: OracleErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// The oracle answered, but the text names no legal cell.
#[derive(Debug, Clone, Display, Error)]
#[display("Unusable move proposal {:?} at {}:{}", response, file, line)]
pub struct OracleParseError {
    /// The raw response text.
    pub response: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    pub fn new(response: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            response: response.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Either way a move request can fail.
#[derive(Debug, Clone, Display, Error, From)]
pub enum MoveRequestError {
    /// The call itself failed.
    #[display("{_0}")]
    Oracle(OracleError),
    /// The call returned text without a legal cell.
    #[display("{_0}")]
    Parse(OracleParseError),
}
