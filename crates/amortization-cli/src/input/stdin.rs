use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read loan parameters piped on stdin.
///
/// Returns `None` when stdin is a terminal or carries nothing but whitespace,
/// so the caller can fall back to individual flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse loan parameters from stdin: {e}"))?;
    tracing::debug!(bytes = trimmed.len(), "loaded loan parameters from stdin");
    Ok(Some(value))
}
