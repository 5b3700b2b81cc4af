use std::fmt;
use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced while building an automaton or loading input.
#[derive(Debug)]
pub enum GraphError {
    /// A word arrived lexicographically before the previously inserted one.
    /// The register can no longer be trusted; the caller must discard the
    /// automaton and rebuild from a fully sorted word list.
    OutOfOrder { previous: String, word: String },
    /// A word outside the supported alphabet (ASCII lowercase), or empty.
    InvalidToken(String),
    /// Underlying I/O failure while reading a wordlist.
    Io(io::Error),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::OutOfOrder { previous, word } => {
                write!(f, "out-of-order insertion: {:?} after {:?}", word, previous)
            }
            GraphError::InvalidToken(word) => {
                write!(f, "invalid token {:?}: expected a nonempty lowercase word", word)
            }
            GraphError::Io(e) => write!(f, "wordlist I/O error: {}", e),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GraphError {
    fn from(e: io::Error) -> Self {
        GraphError::Io(e)
    }
}
