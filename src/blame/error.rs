use thiserror::Error;

/// Why porcelain input could not be turned into a [`BlameDocument`](super::BlameDocument).
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line that cannot appear where it did. `line` is 1-based and counts
    /// every input line, blank ones included.
    #[error("syntax error on line {line}")]
    Syntax { line: usize },

    /// The input stream itself failed.
    #[error(transparent)]
    Read(#[from] std::io::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;
