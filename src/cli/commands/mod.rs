//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod common;
pub mod consumption;
pub mod export;
pub mod init;
pub mod list;
pub mod note;
pub mod plan;
pub mod show;
pub mod validate;
