//! Wire types exchanged with the Dockstore webservice.

pub mod api;
pub mod tool;
pub mod user;
pub mod workflow;
