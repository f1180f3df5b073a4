use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "workflow")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub source_control: String,
    pub organization: String,
    pub repository: String,
    pub workflow_name: Option<String>,
    pub descriptor_type: String,
    pub default_workflow_path: String,
    pub is_published: bool,
    pub mode: String,
    pub topic: Option<String>,
    pub github_app_installation_id: Option<i64>,
    pub last_refreshed: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enduser::Entity",
        from = "Column::UserId",
        to = "super::enduser::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Enduser,
    #[sea_orm(has_many = "super::workflowversion::Entity")]
    Workflowversion,
}

impl Related<super::enduser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enduser.def()
    }
}

impl Related<super::workflowversion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workflowversion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
