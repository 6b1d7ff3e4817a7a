pub mod blame;

use wasm_bindgen::prelude::*;

pub use blame::{parse_porcelain, parse_porcelain_str, BlameDocument, BlameRecord, ParseError};

// ---------------------------------------------------------------------------
// JSON error envelope shared by the exported functions.
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ErrorResult {
    error: String,
}

fn json_error(msg: &str) -> String {
    serde_json::to_string(&ErrorResult {
        error: msg.to_string(),
    })
    .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", msg))
}

// ---------------------------------------------------------------------------
// WASM-exported functions
// ---------------------------------------------------------------------------

/// Parse raw `git blame --porcelain` output into JSON.
///
/// Input: raw bytes of the porcelain output; invalid UTF-8 becomes U+FFFD.
/// Returns: JSON string `{ "blame_lines": [ {field: value, ...}, ... ] }`,
/// or `{ "error": "..." }` if the input is malformed.
#[wasm_bindgen]
pub fn parse_porcelain_blame(raw_blame: &[u8]) -> String {
    let document = match blame::parse_porcelain(raw_blame) {
        Ok(document) => document,
        Err(e) => return json_error(&e.to_string()),
    };

    serde_json::to_string(&document)
        .unwrap_or_else(|e| json_error(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
