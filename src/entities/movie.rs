use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A catalog entry. `genre` is stored as free text; the table's CHECK
/// constraint decides which values are accepted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub genre: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_favorite::Entity")]
    UserFavorite,
}

impl Related<super::user_favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFavorite.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
