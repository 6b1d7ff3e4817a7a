pub mod error;
pub mod parser;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use parser::{normalize_key, parse_porcelain, parse_porcelain_str, PorcelainScanner};
pub use types::*;
