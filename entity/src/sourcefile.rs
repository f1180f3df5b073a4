use sea_orm::entity::prelude::*;

/// A descriptor file attached to either a tool tag or a workflow version.
///
/// `parent_type` is `tag` or `workflowversion`; `parent_id` points into the
/// matching table. There is no foreign key since the parent is polymorphic.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "sourcefile")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub parent_type: String,
    pub parent_id: i32,
    pub path: String,
    pub file_type: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
