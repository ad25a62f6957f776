use anyhow::Result;
use std::io::Write;

use crate::store::UserStore;
use crate::workspace::Session;

/// Handle the push command - hand the full record to the store.
/// Local state is left untouched when the sync fails.
pub fn handle<S: UserStore, W: Write>(
    session: &mut Session,
    store: &S,
    output: &mut W,
) -> Result<()> {
    session.push(store)?;
    tracing::info!(
        branch = session.git().current_branch.as_str(),
        remote = session.git().remote_url.as_deref(),
        "pushed"
    );
    writeln!(output, "ok")?;
    Ok(())
}
