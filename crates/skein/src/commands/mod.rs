//! Command implementations that live outside the thin CLI dispatch layer.

pub mod init;
