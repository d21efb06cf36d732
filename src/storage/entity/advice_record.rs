use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "advice_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub field_id: Option<i32>,
    pub reading_id: i32,
    pub advice: String,
    pub source: String, // ai / rules
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
