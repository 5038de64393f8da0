use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise piped JSON from stdin into a typed input.
///
/// Interactive (TTY) or empty stdin yields `None` so the caller can fall
/// back to command-line flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    log::debug!("parsing {} bytes of piped input", trimmed.len());
    let parsed = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse piped input: {}", e))?;
    Ok(Some(parsed))
}
