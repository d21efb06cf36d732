pub mod advice;
pub mod model;
pub mod sensors;
pub mod service;
pub mod weather;

pub use advice::AdviceGenerator;
pub use service::{DashboardError, DashboardQuery, DashboardService};
pub use weather::{OpenWeatherProvider, WeatherError, WeatherProvider};
