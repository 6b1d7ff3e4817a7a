//! `git-blame-json`: read `git blame --porcelain` output on stdin and write
//! it to stdout as `{"blame_lines": [...]}`.

use std::io::{self, Write};
use std::process::ExitCode;

use blame_json::{parse_porcelain, BlameDocument, ParseError};
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("reading input: {0}")]
    Parse(#[from] ParseError),

    #[error("json encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("json encoding error: {0}")]
    Write(#[source] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let document = parse_porcelain(io::stdin().lock())?;
    write_document(&document, &mut io::stdout().lock())
}

/// Serialize fully before writing so a failure never leaves partial JSON.
fn write_document<W: Write>(document: &BlameDocument, out: &mut W) -> Result<(), AppError> {
    let mut buf = serde_json::to_vec(document)?;
    buf.push(b'\n');
    out.write_all(&buf).map_err(AppError::Write)?;
    out.flush().map_err(AppError::Write)
}
