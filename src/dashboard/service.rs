use crate::dashboard::advice::{rule_tips, soil_status, water_quality, AdviceGenerator};
use crate::dashboard::model::DashboardReport;
use crate::dashboard::sensors;
use crate::dashboard::weather::WeatherProvider;
use crate::storage::repository::{FarmRepository, ReadingRepository};
use log::{info, warn};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error("field {0} not found")]
    FieldNotFound(i32),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardQuery {
    pub field_id: Option<i32>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

pub struct DashboardService {
    db: Arc<DatabaseConnection>,
    weather: Arc<dyn WeatherProvider>,
    advice: AdviceGenerator,
    default_coords: (f64, f64),
}

impl DashboardService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        weather: Arc<dyn WeatherProvider>,
        advice: AdviceGenerator,
        default_coords: (f64, f64),
    ) -> Self {
        Self {
            db,
            weather,
            advice,
            default_coords,
        }
    }

    /// Explicit coordinates win, then the field's farm, then the configured default.
    async fn resolve_coords(&self, q: &DashboardQuery) -> Result<(f64, f64), DashboardError> {
        let mut coords = self.default_coords;
        if let Some(field_id) = q.field_id {
            let field = FarmRepository::get_field(self.db.as_ref(), field_id)
                .await?
                .ok_or(DashboardError::FieldNotFound(field_id))?;
            if let Some(farm) = FarmRepository::get_farm(self.db.as_ref(), field.farm_id).await? {
                if let (Some(lat), Some(lon)) = (farm.latitude, farm.longitude) {
                    coords = (lat, lon);
                }
            }
        }
        if let (Some(lat), Some(lon)) = (q.lat, q.lon) {
            coords = (lat, lon);
        }
        Ok(coords)
    }

    /// weather -> sensors -> advice -> persist. Weather and advice are best
    /// effort; only storage failures abort the refresh.
    pub async fn refresh(&self, q: DashboardQuery) -> Result<DashboardReport, DashboardError> {
        let (lat, lon) = self.resolve_coords(&q).await?;

        let forecast = match self.weather.forecast(lat, lon).await {
            Ok(days) => days,
            Err(e) => {
                warn!("weather forecast unavailable for ({lat}, {lon}): {e}");
                Vec::new()
            }
        };

        let snapshot = sensors::generate(&mut rand::thread_rng());
        let quality = water_quality(&snapshot);
        let soil = soil_status(&snapshot);
        let tips = rule_tips(&snapshot, &forecast);
        let (advice, source) = self.advice.generate(&snapshot, &forecast, &tips).await;

        let saved = ReadingRepository::save_snapshot(
            self.db.as_ref(),
            q.field_id,
            &snapshot,
            quality,
            lat,
            lon,
            &forecast,
            &advice,
            source,
        )
        .await?;
        info!(
            "dashboard refreshed: reading {} prediction {} advice {} ({})",
            saved.reading_id,
            saved.prediction_id,
            saved.advice_id,
            source.as_str()
        );

        Ok(DashboardReport {
            field_id: q.field_id,
            sensors: snapshot,
            water_quality: quality,
            soil_status: soil,
            forecast,
            tips,
            advice,
            advice_source: source,
            reading_id: saved.reading_id,
            generated_at: saved.recorded_at,
        })
    }
}
