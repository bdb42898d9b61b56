//! Console display sink.

use anyhow::Result;
use std::io::Write;

/// Writes extracted text, ending with a newline if it lacks one.
pub fn show_text<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the body bytes unchanged.
pub fn show_bytes<W: Write>(out: &mut W, body: &[u8]) -> Result<()> {
    out.write_all(body)?;
    out.flush()?;
    Ok(())
}
