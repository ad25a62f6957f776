//! Handle stage / unstage

use std::io::Write;

use anyhow::Result;

use crate::error::Error;
use crate::workspace::Session;

/// Handle `stage <file-id>` - idempotent set insert
pub fn stage<W: Write>(session: &mut Session, args: &str, output: &mut W) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Protocol("usage: stage <file-id>".to_string()).into());
    }
    session.stage(args)?;
    writeln!(output, "ok")?;
    Ok(())
}

/// Handle `unstage <file-id>` - no-ops if the id is not staged
pub fn unstage<W: Write>(session: &mut Session, args: &str, output: &mut W) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Protocol("usage: unstage <file-id>".to_string()).into());
    }
    session.unstage(args)?;
    writeln!(output, "ok")?;
    Ok(())
}
