use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    /// `dockstore`, `github.com`, `google.com` or `bitbucket.org`
    pub token_source: String,
    pub content: String,
    pub refresh_token: Option<String>,
    pub username: String,
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
}

impl Related<super::enduser::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enduser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
