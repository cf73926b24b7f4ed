//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub pass_hash: Vec<u8>,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            pass_hash: model.pass_hash,
            user_name: model.user_name,
            first_name: model.first_name,
            last_name: model.last_name,
            photo_url: model.photo_url,
        }
    }
}
