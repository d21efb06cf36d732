use crate::storage::entity::farm::{self, ActiveModel as FarmActiveModel, Entity as Farm};
use crate::storage::entity::field::{self, ActiveModel as FieldActiveModel, Entity as Field};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewFarm {
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewField {
    pub name: String,
    pub crop_type: Option<String>,
    pub area_hectares: Option<f64>,
}

pub struct FarmRepository;

impl FarmRepository {
    pub async fn create_farm(
        db: &DatabaseConnection,
        new: NewFarm,
    ) -> Result<farm::Model, sea_orm::DbErr> {
        let active = FarmActiveModel {
            name: Set(new.name),
            location: Set(new.location),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn list_farms(db: &DatabaseConnection) -> Result<Vec<farm::Model>, sea_orm::DbErr> {
        Farm::find().order_by_asc(farm::Column::Id).all(db).await
    }

    pub async fn get_farm(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<farm::Model>, sea_orm::DbErr> {
        Farm::find_by_id(id).one(db).await
    }

    pub async fn create_field(
        db: &DatabaseConnection,
        farm_id: i32,
        new: NewField,
    ) -> Result<field::Model, sea_orm::DbErr> {
        let active = FieldActiveModel {
            farm_id: Set(farm_id),
            name: Set(new.name),
            crop_type: Set(new.crop_type),
            area_hectares: Set(new.area_hectares),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };
        active.insert(db).await
    }

    pub async fn list_fields(
        db: &DatabaseConnection,
        farm_id: i32,
    ) -> Result<Vec<field::Model>, sea_orm::DbErr> {
        Field::find()
            .filter(field::Column::FarmId.eq(farm_id))
            .order_by_asc(field::Column::Id)
            .all(db)
            .await
    }

    pub async fn get_field(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<field::Model>, sea_orm::DbErr> {
        Field::find_by_id(id).one(db).await
    }
}
