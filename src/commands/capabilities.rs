use anyhow::Result;
use std::io::Write;

/// Handle the capabilities command
/// Output the commands this simulator supports
pub fn handle<W: Write>(output: &mut W) -> Result<()> {
    for command in [
        "signup", "login", "logout", "whoami", "init", "file", "delete", "status", "stage",
        "unstage", "commit", "log", "diff", "remote", "push", "pull",
    ] {
        writeln!(output, "{}", command)?;
    }
    writeln!(output)?; // Empty line signals completion

    Ok(())
}
