//! Dockstore command line client.
//!
//! The binary is a thin wrapper around [`cli::run`], which executes a single
//! command and returns its exit status instead of terminating the process.

pub mod api;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod entry;
pub mod error;
pub mod model;
pub mod notify;
