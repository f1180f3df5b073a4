//! Repositories over the seeded registry tables.

pub mod sourcefile;
pub mod tool;
pub mod user;
pub mod workflow;

pub use self::{
    sourcefile::SourcefileRepository, tool::ToolRepository, user::UserRepository,
    workflow::WorkflowRepository,
};
