//! Property tests: probability range, label monotonicity, deterministic inference.

mod common;

use failure_predictor::{
    config::ThresholdsConfig,
    features::{MachineType, SensorReadings, TypeEncoding},
    model::Artifacts,
    risk::{Label, Predictor},
};
use proptest::prelude::*;
use std::sync::Arc;

fn predictor() -> Predictor {
    let dir = tempfile::tempdir().unwrap();
    let (scaler, model) = common::write_artifacts(dir.path());
    let artifacts = Artifacts::load(&scaler, &model).unwrap();
    Predictor::new(
        Arc::new(artifacts),
        ThresholdsConfig::default(),
        TypeEncoding::Ordinal,
    )
}

fn readings() -> impl Strategy<Value = SensorReadings> {
    (
        prop::sample::select(MachineType::ALL.to_vec()),
        150.0f64..=600.0,
        150.0f64..=600.0,
        0u32..=10_000,
        0.0f64..=700.0,
        0u32..=1000,
    )
        .prop_map(
            |(machine_type, air, process, speed, torque, wear)| SensorReadings {
                machine_type,
                air_temperature: air,
                process_temperature: process,
                rotational_speed: speed,
                torque,
                tool_wear: wear,
            },
        )
}

proptest! {
    #[test]
    fn probability_in_unit_interval(r in readings()) {
        let p = predictor().predict_readings(&r).unwrap().probability;
        prop_assert!((0.0..=1.0).contains(&p), "probability {}", p);
    }

    #[test]
    fn repeated_inference_is_bit_identical(r in readings()) {
        let predictor = predictor();
        let x = r.to_feature_vector(TypeEncoding::Ordinal);
        prop_assert_eq!(predictor.probability(&x).to_bits(), predictor.probability(&x).to_bits());
    }

    #[test]
    fn label_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0, threshold in 0.0f64..=1.0) {
        let t = ThresholdsConfig { label: threshold, ..Default::default() };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if Label::from_probability(lo, &t) == Label::Failure {
            prop_assert_eq!(Label::from_probability(hi, &t), Label::Failure);
        }
    }
}
