use std::io::{BufRead, Write};

use anyhow::Result;

use crate::commands;
use crate::config::PlaygroundConfig;
use crate::store::UserStore;
use crate::workspace::Session;

/// Main protocol handler - reads commands from the host one line at a
/// time and dispatches them.
///
/// Failures are contained per command: the handler's error becomes a
/// single `error <msg>` line and the loop keeps going. After each
/// successful state-mutating command the session auto-syncs to the
/// store (a no-op while signed out). The loop ends on EOF or a lone
/// empty line.
pub fn handle_commands<S, R, W>(
    session: &mut Session,
    store: &S,
    config: &PlaygroundConfig,
    input: R,
    output: &mut W,
) -> Result<()>
where
    S: UserStore,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        tracing::debug!(command = line, "received command");

        if line.is_empty() {
            // Empty line signals end of command batch
            break;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let result = match verb {
            "capabilities" => commands::capabilities::handle(output),
            "signup" => commands::auth::signup(session, store, rest, output),
            "login" => commands::auth::login(session, store, rest, output),
            "logout" => commands::auth::logout(session, output),
            "whoami" => commands::auth::whoami(session, output),
            "init" => commands::init::handle(session, output),
            "file" => commands::files::upsert(session, rest, output),
            "delete" => commands::files::delete(session, rest, output),
            "status" => commands::status::handle(session, output),
            "stage" => commands::stage::stage(session, rest, output),
            "unstage" => commands::stage::unstage(session, rest, output),
            "commit" => commands::commit::handle(session, rest, output),
            "log" => commands::log::handle(session, output),
            "diff" => commands::diff::handle(session, rest, output),
            "remote" => commands::remote::handle(session, config, rest, output),
            "push" => commands::push::handle(session, store, output),
            "pull" => commands::pull::handle(session, store, output),
            cmd => {
                tracing::warn!(command = cmd, "unknown command");
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                if mutates_session(verb) {
                    session.autosync(store);
                }
            }
            Err(e) => {
                writeln!(output, "error {}", e)?;
            }
        }

        output.flush()?;
    }

    Ok(())
}

/// Commands whose success should trigger an auto-sync. Push is itself a
/// sync and pull just adopted the latest record; auth commands manage
/// the identity the sync would be keyed by.
fn mutates_session(verb: &str) -> bool {
    matches!(
        verb,
        "init" | "file" | "delete" | "stage" | "unstage" | "commit" | "remote"
    )
}
