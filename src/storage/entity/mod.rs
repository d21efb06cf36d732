pub mod advice_record;
pub mod farm;
pub mod field;
pub mod sensor_reading;
pub mod weather_prediction;

pub use advice_record::Entity as AdviceRecord;
pub use farm::Entity as Farm;
pub use field::Entity as Field;
pub use sensor_reading::Entity as SensorReading;
pub use weather_prediction::Entity as WeatherPrediction;
