use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tool")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub registry: String,
    pub namespace: String,
    pub name: String,
    pub toolname: Option<String>,
    pub mode: String,
    pub git_url: String,
    pub is_published: bool,
    pub default_cwl_path: String,
    pub default_wdl_path: String,
    pub default_dockerfile_path: String,
    pub topic: Option<String>,
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
    #[sea_orm(has_many = "super::tag::Entity")]
    Tag,
}

impl Related<super::enduser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enduser.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
