//! End-to-end tests of CLI commands against the webservice stand-in.
//!
//! Each test seeds a fresh database, runs one or more commands and checks the
//! exit code, the printed output and the resulting database rows.

mod config;
mod convert;
mod launch;
mod tool;
mod workflow;

use dockstore_test_utils::prelude::*;
