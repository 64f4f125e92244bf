//! JSON output for one-shot commands
//!
//! - Output: single JSON object per command, one line
//! - UTF-8 only

use std::io::Write;

use serde_json::{json, Value};

use super::errors::CliResult;

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    write_line(
        out,
        &json!({
            "status": "ok",
            "data": data
        }),
    )
}

/// Write a "no such record" response
pub fn write_not_found<W: Write>(out: &mut W, id: u64) -> CliResult<()> {
    write_line(
        out,
        &json!({
            "status": "not_found",
            "id": id
        }),
    )
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(
        out,
        &json!({
            "status": "error",
            "code": code,
            "message": message
        }),
    )
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
