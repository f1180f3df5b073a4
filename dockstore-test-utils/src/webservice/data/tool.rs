use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct NewTag {
    pub name: String,
    pub reference: String,
    pub image_id: Option<String>,
    pub cwl_path: String,
    pub wdl_path: String,
    pub dockerfile_path: String,
    pub hidden: bool,
}

pub struct NewTool {
    pub user_id: i32,
    pub registry: String,
    pub namespace: String,
    pub name: String,
    pub toolname: Option<String>,
    pub mode: String,
    pub git_url: String,
    pub default_cwl_path: String,
    pub default_wdl_path: String,
    pub default_dockerfile_path: String,
}

pub struct ToolRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ToolRepository<'a> {
    /// Creates a new instance of [`ToolRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, tool_id: i32) -> Result<Option<entity::tool::Model>, DbErr> {
        entity::prelude::Tool::find_by_id(tool_id).one(self.db).await
    }

    /// Finds a tool by its path segments; a missing `toolname` only matches tools without one
    pub async fn get_by_path(
        &self,
        registry: &str,
        namespace: &str,
        name: &str,
        toolname: Option<&str>,
    ) -> Result<Option<entity::tool::Model>, DbErr> {
        let query = entity::prelude::Tool::find()
            .filter(entity::tool::Column::Registry.eq(registry))
            .filter(entity::tool::Column::Namespace.eq(namespace))
            .filter(entity::tool::Column::Name.eq(name));

        let query = match toolname {
            Some(toolname) => query.filter(entity::tool::Column::Toolname.eq(toolname)),
            None => query.filter(entity::tool::Column::Toolname.is_null()),
        };

        query.one(self.db).await
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::tool::Model>, DbErr> {
        entity::prelude::Tool::find()
            .filter(entity::tool::Column::UserId.eq(user_id))
            .order_by_asc(entity::tool::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_published(&self) -> Result<Vec<entity::tool::Model>, DbErr> {
        entity::prelude::Tool::find()
            .filter(entity::tool::Column::IsPublished.eq(true))
            .order_by_asc(entity::tool::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn set_published(
        &self,
        tool: entity::tool::Model,
        publish: bool,
    ) -> Result<entity::tool::Model, DbErr> {
        let mut tool: entity::tool::ActiveModel = tool.into();
        tool.is_published = ActiveValue::Set(publish);
        tool.update(self.db).await
    }

    /// Inserts a tool together with its first tag
    pub async fn create_with_tag(
        &self,
        tool: NewTool,
        tag: NewTag,
    ) -> Result<entity::tool::Model, DbErr> {
        let txn = self.db.begin().await?;

        let tool = entity::tool::ActiveModel {
            user_id: ActiveValue::Set(tool.user_id),
            registry: ActiveValue::Set(tool.registry),
            namespace: ActiveValue::Set(tool.namespace),
            name: ActiveValue::Set(tool.name),
            toolname: ActiveValue::Set(tool.toolname),
            mode: ActiveValue::Set(tool.mode),
            git_url: ActiveValue::Set(tool.git_url),
            is_published: ActiveValue::Set(false),
            default_cwl_path: ActiveValue::Set(tool.default_cwl_path),
            default_wdl_path: ActiveValue::Set(tool.default_wdl_path),
            default_dockerfile_path: ActiveValue::Set(tool.default_dockerfile_path),
            topic: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        tag_active_model(tool.id, tag).insert(&txn).await?;

        txn.commit().await?;

        Ok(tool)
    }

    pub async fn get_tags(&self, tool_id: i32) -> Result<Vec<entity::tag::Model>, DbErr> {
        entity::prelude::Tag::find()
            .filter(entity::tag::Column::ToolId.eq(tool_id))
            .order_by_asc(entity::tag::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn add_tag(&self, tool_id: i32, tag: NewTag) -> Result<entity::tag::Model, DbErr> {
        tag_active_model(tool_id, tag).insert(self.db).await
    }

    /// Deletes a tag of the tool
    ///
    /// Returns OK regardless of the tag existing, check [`DeleteResult::rows_affected`].
    pub async fn delete_tag(&self, tool_id: i32, tag_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Tag::delete_many()
            .filter(entity::tag::Column::Id.eq(tag_id))
            .filter(entity::tag::Column::ToolId.eq(tool_id))
            .exec(self.db)
            .await
    }

    pub async fn set_tag_valid(
        &self,
        tag: entity::tag::Model,
        valid: bool,
    ) -> Result<entity::tag::Model, DbErr> {
        let mut tag: entity::tag::ActiveModel = tag.into();
        tag.valid = ActiveValue::Set(valid);
        tag.update(self.db).await
    }
}

fn tag_active_model(tool_id: i32, tag: NewTag) -> entity::tag::ActiveModel {
    entity::tag::ActiveModel {
        tool_id: ActiveValue::Set(tool_id),
        name: ActiveValue::Set(tag.name),
        reference: ActiveValue::Set(tag.reference),
        image_id: ActiveValue::Set(tag.image_id),
        cwl_path: ActiveValue::Set(tag.cwl_path),
        wdl_path: ActiveValue::Set(tag.wdl_path),
        dockerfile_path: ActiveValue::Set(tag.dockerfile_path),
        hidden: ActiveValue::Set(tag.hidden),
        valid: ActiveValue::Set(true),
        ..Default::default()
    }
}
