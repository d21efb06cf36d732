use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    /// Volumetric soil moisture, percent.
    pub soil_moisture: f64,
    /// Total dissolved solids, ppm.
    pub tds: f64,
    pub ph_level: f64,
    /// Water clarity, percent.
    pub clarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub day: usize,
    pub date: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    /// 0.0 - 1.0
    pub rain_probability: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "excellent",
            QualityLevel::Good => "good",
            QualityLevel::Fair => "fair",
            QualityLevel::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilStatus {
    Dry,
    Optimal,
    Wet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    Ai,
    Rules,
}

impl AdviceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceSource::Ai => "ai",
            AdviceSource::Rules => "rules",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub field_id: Option<i32>,
    pub sensors: SensorSnapshot,
    pub water_quality: QualityLevel,
    pub soil_status: SoilStatus,
    pub forecast: Vec<DailyForecast>,
    pub tips: Vec<String>,
    pub advice: String,
    pub advice_source: AdviceSource,
    pub reading_id: i32,
    pub generated_at: i64,
}
