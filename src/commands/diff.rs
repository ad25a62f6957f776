use anyhow::Result;
use std::io::Write;

use crate::error::Error;
use crate::workspace::Session;

/// Handle `diff <file-id>`
/// Answers with a whole-file before/after JSON object; the original
/// side is empty for a file never committed.
pub fn handle<W: Write>(session: &Session, args: &str, output: &mut W) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Protocol("usage: diff <file-id>".to_string()).into());
    }
    let view = session.diff(args)?;
    writeln!(output, "{}", serde_json::to_string(&view)?)?;
    Ok(())
}
