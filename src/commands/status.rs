use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::git::ChangeType;
use crate::workspace::Session;

#[derive(Serialize)]
struct StatusLine<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    change_type: ChangeType,
    staged: bool,
}

/// Handle the status command
/// Output one JSON line per pending change, staged entries first,
/// otherwise in live file-list order
pub fn handle<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    let changes = session.changes()?;

    let (staged, unstaged): (Vec<_>, Vec<_>) = changes
        .into_iter()
        .partition(|change| session.git().is_staged(&change.file.id));

    for change in staged.iter().chain(unstaged.iter()) {
        let line = StatusLine {
            id: &change.file.id,
            name: &change.file.name,
            change_type: change.change_type,
            staged: session.git().is_staged(&change.file.id),
        };
        writeln!(output, "{}", serde_json::to_string(&line)?)?;
    }
    writeln!(output)?; // Empty line signals completion

    Ok(())
}
