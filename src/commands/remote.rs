use anyhow::Result;
use std::io::Write;

use crate::config::PlaygroundConfig;
use crate::error::Error;
use crate::workspace::Session;

/// Handle `remote <url-or-shorthand>`
/// Stores the remote, expanding `owner/repo` against the configured
/// host, and echoes the stored form.
pub fn handle<W: Write>(
    session: &mut Session,
    config: &PlaygroundConfig,
    args: &str,
    output: &mut W,
) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Protocol("usage: remote <url>".to_string()).into());
    }
    let stored = session.set_remote(args, &config.remote_host)?;
    writeln!(output, "ok {}", stored)?;
    Ok(())
}
