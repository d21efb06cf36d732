use crate::dashboard::model::{AdviceSource, DailyForecast, QualityLevel, SensorSnapshot};
use crate::storage::entity::advice_record::ActiveModel as AdviceActiveModel;
use crate::storage::entity::sensor_reading::{
    self, ActiveModel as ReadingActiveModel, Entity as SensorReading,
};
use crate::storage::entity::weather_prediction::ActiveModel as PredictionActiveModel;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

#[derive(Debug, Clone, Copy)]
pub struct SavedSnapshot {
    pub reading_id: i32,
    pub prediction_id: i32,
    pub advice_id: i32,
    pub recorded_at: i64,
}

pub struct ReadingRepository;

impl ReadingRepository {
    /// Writes the reading, the forecast and the advice of one dashboard refresh
    /// in a single transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn save_snapshot(
        db: &DatabaseConnection,
        field_id: Option<i32>,
        sensors: &SensorSnapshot,
        quality: QualityLevel,
        lat: f64,
        lon: f64,
        forecast: &[DailyForecast],
        advice: &str,
        source: AdviceSource,
    ) -> Result<SavedSnapshot, sea_orm::DbErr> {
        let now = Utc::now().timestamp();
        let forecast_json = serde_json::to_string(forecast)
            .map_err(|e| sea_orm::DbErr::Custom(format!("forecast serialize failed: {e}")))?;

        let txn = db.begin().await?;

        let reading = ReadingActiveModel {
            field_id: Set(field_id),
            soil_moisture: Set(sensors.soil_moisture),
            tds: Set(sensors.tds),
            ph_level: Set(sensors.ph_level),
            clarity: Set(sensors.clarity),
            water_quality: Set(quality.as_str().to_string()),
            recorded_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let prediction = PredictionActiveModel {
            field_id: Set(field_id),
            latitude: Set(lat),
            longitude: Set(lon),
            forecast_json: Set(forecast_json),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let advice = AdviceActiveModel {
            field_id: Set(field_id),
            reading_id: Set(reading.id),
            advice: Set(advice.to_string()),
            source: Set(source.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(SavedSnapshot {
            reading_id: reading.id,
            prediction_id: prediction.id,
            advice_id: advice.id,
            recorded_at: now,
        })
    }

    /// Most recent first.
    pub async fn recent_readings(
        db: &DatabaseConnection,
        field_id: Option<i32>,
        limit: u64,
    ) -> Result<Vec<sensor_reading::Model>, sea_orm::DbErr> {
        let mut query = SensorReading::find();
        if let Some(id) = field_id {
            query = query.filter(sensor_reading::Column::FieldId.eq(id));
        }
        query
            .order_by_desc(sensor_reading::Column::RecordedAt)
            .order_by_desc(sensor_reading::Column::Id)
            .limit(limit)
            .all(db)
            .await
    }
}
