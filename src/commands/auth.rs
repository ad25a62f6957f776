//! Handle signup / login / logout

use std::io::Write;

use anyhow::Result;

use crate::error::Error;
use crate::store::UserStore;
use crate::workspace::Session;

/// Handle `signup <email> <display name...>`
pub fn signup<S: UserStore, W: Write>(
    session: &mut Session,
    store: &S,
    args: &str,
    output: &mut W,
) -> Result<()> {
    let (email, name) = args
        .split_once(char::is_whitespace)
        .map(|(email, name)| (email, name.trim()))
        .filter(|(email, name)| !email.is_empty() && !name.is_empty())
        .ok_or_else(|| Error::Protocol("usage: signup <email> <name>".to_string()))?;

    session.signup(store, name, email)?;
    writeln!(output, "ok")?;
    Ok(())
}

/// Handle `login <email>`
pub fn login<S: UserStore, W: Write>(
    session: &mut Session,
    store: &S,
    args: &str,
    output: &mut W,
) -> Result<()> {
    if args.is_empty() {
        return Err(Error::Protocol("usage: login <email>".to_string()).into());
    }

    session.login(store, args)?;
    writeln!(output, "ok")?;
    Ok(())
}

/// Handle `logout`
pub fn logout<W: Write>(session: &mut Session, output: &mut W) -> Result<()> {
    session.logout()?;
    writeln!(output, "ok")?;
    Ok(())
}

/// Handle `whoami` - answer with the signed-in profile as JSON
pub fn whoami<W: Write>(session: &Session, output: &mut W) -> Result<()> {
    let profile = session.profile().ok_or(Error::NotSignedIn)?;
    writeln!(output, "{}", serde_json::to_string(profile)?)?;
    Ok(())
}
