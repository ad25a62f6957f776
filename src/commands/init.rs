use anyhow::Result;
use std::io::Write;

use crate::workspace::Session;

/// Handle the init command - mark the repository initialized and reset
/// the snapshot map
pub fn handle<W: Write>(session: &mut Session, output: &mut W) -> Result<()> {
    session.init_repository()?;
    writeln!(output, "ok")?;
    Ok(())
}
