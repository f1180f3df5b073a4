//! Business rules of the webservice stand-in.
//!
//! Services own visibility and ownership checks; repositories only run queries.

pub mod auth;
pub mod tool;
pub mod trs;
pub mod workflow;

use dockstore::entry::EntryPath;

use super::error::Error;

pub use self::{auth::AuthService, tool::ToolService, trs::TrsService, workflow::WorkflowService};

fn parse_path(path: &str) -> Result<EntryPath, Error> {
    path.parse()
        .map_err(|e: dockstore::error::Error| Error::BadRequest(e.to_string()))
}

/// Entries are visible to their owner and, once published, to everyone.
fn is_visible(owner_id: i32, is_published: bool, user: Option<&entity::enduser::Model>) -> bool {
    is_published || user.is_some_and(|user| user.id == owner_id || user.is_admin)
}

fn ensure_owner(owner_id: i32, user: &entity::enduser::Model, what: &str) -> Result<(), Error> {
    if user.id == owner_id || user.is_admin {
        Ok(())
    } else {
        Err(Error::Forbidden(format!("User {} does not own {what}", user.username)))
    }
}
