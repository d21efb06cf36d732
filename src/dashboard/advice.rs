use crate::ai::{LlmProvider, SYSTEM_PROMPT};
use crate::dashboard::model::{AdviceSource, DailyForecast, QualityLevel, SensorSnapshot, SoilStatus};
use log::warn;
use std::sync::Arc;

const DRY_BELOW: f64 = 30.0;
const WET_ABOVE: f64 = 60.0;
const RAIN_LIKELY: f64 = 0.6;

pub fn water_quality(s: &SensorSnapshot) -> QualityLevel {
    let ph_ok = (6.5..=8.5).contains(&s.ph_level);
    match (ph_ok, s.tds) {
        (true, tds) if tds < 300.0 && s.clarity >= 80.0 => QualityLevel::Excellent,
        (true, tds) if tds < 500.0 => QualityLevel::Good,
        (_, tds) if tds < 900.0 => QualityLevel::Fair,
        _ => QualityLevel::Poor,
    }
}

pub fn soil_status(s: &SensorSnapshot) -> SoilStatus {
    if s.soil_moisture < DRY_BELOW {
        SoilStatus::Dry
    } else if s.soil_moisture > WET_ABOVE {
        SoilStatus::Wet
    } else {
        SoilStatus::Optimal
    }
}

/// Highest rain probability over the next two forecast days.
fn rain_soon(forecast: &[DailyForecast]) -> f64 {
    forecast
        .iter()
        .take(2)
        .map(|d| d.rain_probability)
        .fold(0.0, f64::max)
}

pub fn rule_tips(s: &SensorSnapshot, forecast: &[DailyForecast]) -> Vec<String> {
    let mut tips = Vec::new();
    let rain = rain_soon(forecast);

    match soil_status(s) {
        SoilStatus::Dry if rain >= RAIN_LIKELY => tips.push(format!(
            "Soil moisture is low ({:.1}%), but rain is likely ({:.0}%) within two days. Irrigate lightly and let the rain do the rest.",
            s.soil_moisture,
            rain * 100.0
        )),
        SoilStatus::Dry => tips.push(format!(
            "Soil moisture is low ({:.1}%). Irrigate today, preferably early morning or evening.",
            s.soil_moisture
        )),
        SoilStatus::Optimal if rain >= RAIN_LIKELY => tips.push(
            "Soil moisture is adequate and rain is expected. Skip the next irrigation.".to_string(),
        ),
        SoilStatus::Optimal => tips.push(format!(
            "Soil moisture is optimal ({:.1}%). Keep your current irrigation schedule.",
            s.soil_moisture
        )),
        SoilStatus::Wet => tips.push(format!(
            "Soil is very wet ({:.1}%). Pause irrigation and check field drainage.",
            s.soil_moisture
        )),
    }

    if s.ph_level < 6.5 {
        tips.push(format!(
            "Water pH is acidic ({:.2}). Consider liming or blending with another source.",
            s.ph_level
        ));
    } else if s.ph_level > 8.5 {
        tips.push(format!(
            "Water pH is alkaline ({:.2}). Gypsum or acid injection can help.",
            s.ph_level
        ));
    }

    if s.tds >= 500.0 {
        tips.push(format!(
            "Dissolved solids are high ({:.0} ppm). Flush the root zone occasionally to avoid salt build-up.",
            s.tds
        ));
    }

    if s.clarity < 70.0 {
        tips.push(format!(
            "Water clarity is low ({:.0}%). Clean filters to keep drip emitters from clogging.",
            s.clarity
        ));
    }

    if let Some(today) = forecast.first() {
        if today.temp_max >= 35.0 {
            tips.push(format!(
                "High temperature expected ({:.0}°C). Check moisture again in the afternoon.",
                today.temp_max
            ));
        }
    }

    tips
}

fn advice_prompt(s: &SensorSnapshot, forecast: &[DailyForecast]) -> String {
    let mut lines = vec![
        "Give a farmer 2-3 sentences of practical irrigation advice for today based on these readings.".to_string(),
        format!(
            "Soil moisture: {:.1}%. TDS: {:.0} ppm. pH: {:.2}. Water clarity: {:.0}%.",
            s.soil_moisture, s.tds, s.ph_level, s.clarity
        ),
    ];
    for d in forecast.iter().take(3) {
        lines.push(format!(
            "Day {} ({}): {:.0}-{:.0}°C, humidity {:.0}%, rain chance {:.0}%, {}.",
            d.day,
            d.date,
            d.temp_min,
            d.temp_max,
            d.humidity,
            d.rain_probability * 100.0,
            d.description
        ));
    }
    lines.join("\n")
}

pub struct AdviceGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl AdviceGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Asks the provider for a short paragraph; falls back to the joined rule tips.
    pub async fn generate(
        &self,
        s: &SensorSnapshot,
        forecast: &[DailyForecast],
        tips: &[String],
    ) -> (String, AdviceSource) {
        let prompt = advice_prompt(s, forecast);
        match self.provider.send(SYSTEM_PROMPT, &[], &prompt).await {
            Ok(reply) if !reply.text.trim().is_empty() => (reply.text, AdviceSource::Ai),
            Ok(_) => {
                warn!("{} returned empty advice, using rules", self.provider.name());
                (tips.join(" "), AdviceSource::Rules)
            }
            Err(e) => {
                warn!(
                    "{} advice failed [{}]: {}",
                    self.provider.name(),
                    e.kind().as_str(),
                    e
                );
                (tips.join(" "), AdviceSource::Rules)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(moisture: f64, tds: f64, ph: f64, clarity: f64) -> SensorSnapshot {
        SensorSnapshot {
            soil_moisture: moisture,
            tds,
            ph_level: ph,
            clarity,
        }
    }

    fn day(rain: f64, temp_max: f64) -> DailyForecast {
        DailyForecast {
            day: 0,
            date: "2024-06-01".into(),
            temp_min: 20.0,
            temp_max,
            humidity: 50.0,
            rain_probability: rain,
            description: "clouds".into(),
        }
    }

    #[test]
    fn quality_levels() {
        assert_eq!(water_quality(&snapshot(40.0, 200.0, 7.0, 90.0)), QualityLevel::Excellent);
        assert_eq!(water_quality(&snapshot(40.0, 200.0, 7.0, 65.0)), QualityLevel::Good);
        assert_eq!(water_quality(&snapshot(40.0, 450.0, 7.0, 90.0)), QualityLevel::Good);
        assert_eq!(water_quality(&snapshot(40.0, 200.0, 6.1, 90.0)), QualityLevel::Fair);
        assert_eq!(water_quality(&snapshot(40.0, 950.0, 7.0, 90.0)), QualityLevel::Poor);
    }

    #[test]
    fn soil_thresholds() {
        assert_eq!(soil_status(&snapshot(25.0, 0.0, 7.0, 90.0)), SoilStatus::Dry);
        assert_eq!(soil_status(&snapshot(45.0, 0.0, 7.0, 90.0)), SoilStatus::Optimal);
        assert_eq!(soil_status(&snapshot(75.0, 0.0, 7.0, 90.0)), SoilStatus::Wet);
    }

    #[test]
    fn dry_soil_with_rain_coming_suggests_light_irrigation() {
        let tips = rule_tips(&snapshot(22.0, 200.0, 7.0, 90.0), &[day(0.1, 30.0), day(0.8, 30.0)]);
        assert!(tips[0].contains("rain is likely"));
    }

    #[test]
    fn dry_soil_without_rain_says_irrigate_today() {
        let tips = rule_tips(&snapshot(22.0, 200.0, 7.0, 90.0), &[]);
        assert!(tips[0].contains("Irrigate today"));
        assert_eq!(tips.len(), 1);
    }

    #[test]
    fn water_problems_add_tips() {
        let tips = rule_tips(&snapshot(45.0, 550.0, 6.2, 65.0), &[day(0.0, 38.0)]);
        assert_eq!(tips.len(), 5);
        assert!(tips.iter().any(|t| t.contains("acidic")));
        assert!(tips.iter().any(|t| t.contains("ppm")));
        assert!(tips.iter().any(|t| t.contains("clarity")));
        assert!(tips.iter().any(|t| t.contains("High temperature")));
    }

    #[test]
    fn prompt_mentions_readings_and_forecast() {
        let p = advice_prompt(&snapshot(33.3, 250.0, 7.12, 88.0), &[day(0.5, 31.0)]);
        assert!(p.contains("33.3%"));
        assert!(p.contains("pH: 7.12"));
        assert!(p.contains("rain chance 50%"));
    }
}
