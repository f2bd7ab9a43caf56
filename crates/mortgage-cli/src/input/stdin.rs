use serde_json::Value;
use std::io::{self, Read};

/// Request piped on stdin; None when stdin is a terminal.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_request(io::stdin().lock())
}

/// Parse one JSON request from `reader`. Blank input means no request, so
/// `calculate` can fall back to its flags.
pub fn read_request<R: Read>(mut reader: R) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;

    match buffer.trim() {
        "" => Ok(None),
        body => Ok(Some(serde_json::from_str(body)?)),
    }
}
