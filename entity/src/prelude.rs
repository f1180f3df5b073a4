pub use super::enduser::Entity as Enduser;
pub use super::sourcefile::Entity as Sourcefile;
pub use super::tag::Entity as Tag;
pub use super::token::Entity as Token;
pub use super::tool::Entity as Tool;
pub use super::workflow::Entity as Workflow;
pub use super::workflowversion::Entity as Workflowversion;
