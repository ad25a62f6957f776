use anyhow::Result;
use std::io::Write;

use crate::workspace::Session;

/// Handle `commit <message...>` - the rest of the line is the message.
/// Answers with the new commit record as JSON.
pub fn handle<W: Write>(session: &mut Session, args: &str, output: &mut W) -> Result<()> {
    let commit = session.commit(args)?;
    writeln!(output, "{}", serde_json::to_string(&commit)?)?;
    Ok(())
}
