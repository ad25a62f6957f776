pub mod auth;
pub mod capabilities;
pub mod commit;
pub mod diff;
pub mod files;
pub mod init;
pub mod log;
pub mod pull;
pub mod push;
pub mod remote;
pub mod stage;
pub mod status;
