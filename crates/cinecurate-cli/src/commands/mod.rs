//! CLI command implementations.

pub mod curate;
pub mod documents;
pub mod init;
pub mod search;
