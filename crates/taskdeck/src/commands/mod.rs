//! Command implementations that run outside an opened workspace.

pub mod init;
