//! Handle working-tree maintenance (`file`, `delete`)

use std::io::Write;

use anyhow::{Context, Result};

use crate::error::Error;
use crate::workspace::{FileData, Session};

/// Handle `file <FileData JSON>` - create or replace a live file
pub fn upsert<W: Write>(session: &mut Session, args: &str, output: &mut W) -> Result<()> {
    let file: FileData =
        serde_json::from_str(args).context("file command expects a FileData JSON object")?;
    session.upsert_file(file)?;
    writeln!(output, "ok")?;
    Ok(())
}

/// Handle `delete <file-id>` - remove a live file and purge its
/// tracking state
pub fn delete<W: Write>(session: &mut Session, args: &str, output: &mut W) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Protocol("usage: delete <file-id>".to_string()).into());
    }
    session.delete_file(args)?;
    writeln!(output, "ok")?;
    Ok(())
}
