use anyhow::Result;
use std::io::Write;

use crate::workspace::Session;

/// Handle the log command
/// Output one commit JSON per line, newest first
pub fn handle<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    for commit in session.git().commits.iter().rev() {
        writeln!(output, "{}", serde_json::to_string(commit)?)?;
    }
    writeln!(output)?; // Empty line signals completion

    Ok(())
}
