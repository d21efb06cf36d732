//! Simulated field sensors. Stands in for hardware until probes are wired up.

use crate::dashboard::model::SensorSnapshot;
use rand::Rng;

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> SensorSnapshot {
    SensorSnapshot {
        soil_moisture: round_to(rng.gen_range(20.0..=80.0), 1),
        tds: round_to(rng.gen_range(100.0..=600.0), 1),
        ph_level: round_to(rng.gen_range(6.0..=8.5), 2),
        clarity: round_to(rng.gen_range(60.0..=100.0), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn readings_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let s = generate(&mut rng);
            assert!((20.0..=80.0).contains(&s.soil_moisture));
            assert!((100.0..=600.0).contains(&s.tds));
            assert!((6.0..=8.5).contains(&s.ph_level));
            assert!((60.0..=100.0).contains(&s.clarity));
        }
    }

    #[test]
    fn same_seed_same_reading() {
        let a = generate(&mut StdRng::seed_from_u64(42));
        let b = generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
