//! CLI command implementations

pub mod init;
pub mod list;
pub mod new;
pub mod seed;
pub mod show;
