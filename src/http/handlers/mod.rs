pub mod chat;
pub mod dashboard;
pub mod farms;
pub mod health;

pub use chat::{chat, chat_with_provider};
pub use dashboard::{dashboard, list_readings};
pub use farms::{create_farm, create_field, get_farm, list_farms, list_fields};
pub use health::health_check;

use crate::error::AppError;

pub(crate) fn validate_coords(lat: Option<f64>, lon: Option<f64>) -> Result<(), AppError> {
    if let Some(lat) = lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::BadRequest("latitude must be between -90 and 90".into()));
        }
    }
    if let Some(lon) = lon {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::BadRequest("longitude must be between -180 and 180".into()));
        }
    }
    Ok(())
}
