use anyhow::Result;
use std::io::Write;

use crate::store::UserStore;
use crate::workspace::{PullOutcome, Session};

/// Handle the pull command - replace local state with the stored record
/// or report that there is nothing to apply. A missing record is "up to
/// date", not an error.
pub fn handle<S: UserStore, W: Write>(
    session: &mut Session,
    store: &S,
    output: &mut W,
) -> Result<()> {
    match session.pull(store)? {
        PullOutcome::Updated => writeln!(output, "ok updated")?,
        PullOutcome::UpToDate => writeln!(output, "ok up-to-date")?,
    }
    Ok(())
}
