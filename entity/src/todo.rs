use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A single entry on the reading list.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(60))")]
    pub title: String,
    /// The category, stored in the `type` column.
    #[sea_orm(column_name = "type", column_type = "String(StringLen::N(15))")]
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
