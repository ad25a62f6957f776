use std::fmt;

/// Precondition violations and store failures surfaced to the host.
///
/// Every variant here is non-fatal: the protocol loop reports it on a
/// single `error` line and keeps serving commands.
#[derive(Debug)]
pub enum Error {
    NotInitialized,
    NoRemote,
    NotSignedIn,
    EmptyCommitMessage,
    NothingStaged,
    UnknownFile(String),
    UserExists(String),
    UserNotFound(String),
    Protocol(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => write!(f, "no repository: run init first"),
            Error::NoRemote => write!(f, "no remote configured"),
            Error::NotSignedIn => write!(f, "not signed in"),
            Error::EmptyCommitMessage => write!(f, "commit message must not be empty"),
            Error::NothingStaged => write!(f, "nothing staged"),
            Error::UnknownFile(id) => write!(f, "unknown file: {}", id),
            Error::UserExists(email) => write!(f, "user already exists: {}", email),
            Error::UserNotFound(email) => write!(f, "user not found: {}", email),
            Error::Protocol(msg) => write!(f, "protocol error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
