//! sea-orm entities for the registry schema seeded by the fixture migrations.

pub mod prelude;

pub mod enduser;
pub mod sourcefile;
pub mod tag;
pub mod token;
pub mod tool;
pub mod workflow;
pub mod workflowversion;
