use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub static TAG_PARENT: &str = "tag";
pub static WORKFLOW_VERSION_PARENT: &str = "workflowversion";

pub struct SourcefileRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SourcefileRepository<'a> {
    /// Creates a new instance of [`SourcefileRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// The file at `path` attached to a tag or workflow version
    pub async fn get(
        &self,
        parent_type: &str,
        parent_id: i32,
        path: &str,
    ) -> Result<Option<entity::sourcefile::Model>, DbErr> {
        entity::prelude::Sourcefile::find()
            .filter(entity::sourcefile::Column::ParentType.eq(parent_type))
            .filter(entity::sourcefile::Column::ParentId.eq(parent_id))
            .filter(entity::sourcefile::Column::Path.eq(path))
            .one(self.db)
            .await
    }

    /// Stores `content` at `path`, replacing an existing file at the same path
    pub async fn upsert(
        &self,
        parent_type: &str,
        parent_id: i32,
        path: &str,
        file_type: &str,
        content: String,
    ) -> Result<entity::sourcefile::Model, DbErr> {
        match self.get(parent_type, parent_id, path).await? {
            Some(existing) => {
                let mut file: entity::sourcefile::ActiveModel = existing.into();
                file.content = ActiveValue::Set(content);
                file.update(self.db).await
            }
            None => {
                entity::sourcefile::ActiveModel {
                    parent_type: ActiveValue::Set(parent_type.to_string()),
                    parent_id: ActiveValue::Set(parent_id),
                    path: ActiveValue::Set(path.to_string()),
                    file_type: ActiveValue::Set(file_type.to_string()),
                    content: ActiveValue::Set(content),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }
}
