use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    // PHC string; must never appear in logs or responses
    pub pass_hash: String,
    pub is_admin: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a new user row. Duplicate emails surface as the database's
/// uniqueness-constraint violation inside `DbErr`; classification into a
/// business error happens at the storage adapter, not here.
pub async fn insert(db: &DatabaseConnection, email: &str, pass_hash: &str) -> Result<Model, DbErr> {
    let am = ActiveModel {
        email: Set(email.to_string()),
        pass_hash: Set(pass_hash.to_string()),
        is_admin: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, DbErr> {
    Entity::find().filter(Column::Email.eq(email)).one(db).await
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}
