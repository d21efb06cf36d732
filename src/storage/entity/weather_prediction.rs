use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[sea_orm(table_name = "weather_predictions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub field_id: Option<i32>,
    pub latitude: f64,
    pub longitude: f64,
    pub forecast_json: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
