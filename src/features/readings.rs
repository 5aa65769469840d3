//! Operator-entered sensor readings and their declared input bounds.

use super::{Feature, FeatureVector, MachineType, TypeEncoding};
use crate::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};

/// Bounds and default for one numeric input field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub feature: Feature,
    /// Short name used in prompts and error messages
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    /// Whole numbers only (speed in rpm, wear in minutes)
    pub integer: bool,
}

impl FieldSpec {
    pub fn check(&self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(PredictorError::InvalidReading {
                field: self.name,
                reason: format!("{} is not a finite number", value),
            });
        }
        if value < self.min || value > self.max {
            return Err(PredictorError::InvalidReading {
                field: self.name,
                reason: format!("{} is outside [{}, {}]", value, self.min, self.max),
            });
        }
        if self.integer && value.fract() != 0.0 {
            return Err(PredictorError::InvalidReading {
                field: self.name,
                reason: format!("{} is not a whole number", value),
            });
        }
        Ok(())
    }
}

pub static FIELD_SPECS: [FieldSpec; 5] = [
    FieldSpec {
        feature: Feature::AirTemperature,
        name: "air temperature [K]",
        default: 295.0,
        min: 150.0,
        max: 600.0,
        integer: false,
    },
    FieldSpec {
        feature: Feature::ProcessTemperature,
        name: "process temperature [K]",
        default: 305.0,
        min: 150.0,
        max: 600.0,
        integer: false,
    },
    FieldSpec {
        feature: Feature::RotationalSpeed,
        name: "rotational speed [rpm]",
        default: 1650.0,
        min: 0.0,
        max: 10000.0,
        integer: true,
    },
    FieldSpec {
        feature: Feature::Torque,
        name: "torque [Nm]",
        default: 40.0,
        min: 0.0,
        max: 700.0,
        integer: false,
    },
    FieldSpec {
        feature: Feature::ToolWear,
        name: "tool wear [min]",
        default: 15.0,
        min: 0.0,
        max: 1000.0,
        integer: true,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    pub machine_type: MachineType,
    pub air_temperature: f64,
    pub process_temperature: f64,
    pub rotational_speed: u32,
    pub torque: f64,
    pub tool_wear: u32,
}

impl Default for SensorReadings {
    fn default() -> Self {
        Self {
            machine_type: MachineType::L,
            air_temperature: 295.0,
            process_temperature: 305.0,
            rotational_speed: 1650,
            torque: 40.0,
            tool_wear: 15,
        }
    }
}

impl SensorReadings {
    /// Raw value for a numeric field; `Type` has no numeric reading
    pub fn numeric(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Type => None,
            Feature::AirTemperature => Some(self.air_temperature),
            Feature::ProcessTemperature => Some(self.process_temperature),
            Feature::RotationalSpeed => Some(f64::from(self.rotational_speed)),
            Feature::Torque => Some(self.torque),
            Feature::ToolWear => Some(f64::from(self.tool_wear)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for spec in &FIELD_SPECS {
            if let Some(v) = self.numeric(spec.feature) {
                spec.check(v)?;
            }
        }
        Ok(())
    }

    pub fn to_feature_vector(&self, encoding: TypeEncoding) -> FeatureVector {
        FeatureVector([
            self.machine_type.encode(encoding),
            self.air_temperature,
            self.process_temperature,
            f64::from(self.rotational_speed),
            self.torque,
            f64::from(self.tool_wear),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_match_field_bounds() {
        let r = SensorReadings::default();
        r.validate().unwrap();
        for spec in &FIELD_SPECS {
            assert_eq!(r.numeric(spec.feature), Some(spec.default), "{}", spec.name);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        let r = SensorReadings {
            air_temperature: 149.99,
            ..Default::default()
        };
        match r.validate() {
            Err(PredictorError::InvalidReading { field, .. }) => {
                assert_eq!(field, "air temperature [K]")
            }
            other => panic!("expected invalid reading, got {:?}", other),
        }

        let r = SensorReadings {
            rotational_speed: 10_001,
            ..Default::default()
        };
        assert!(r.validate().is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let r = SensorReadings {
            air_temperature: 600.0,
            process_temperature: 150.0,
            rotational_speed: 0,
            torque: 700.0,
            tool_wear: 1000,
            ..Default::default()
        };
        r.validate().unwrap();
    }

    #[test]
    fn rejects_nan() {
        let r = SensorReadings {
            torque: f64::NAN,
            ..Default::default()
        };
        assert!(r.validate().is_err());
    }

    #[test]
    fn integer_fields_reject_fractions() {
        let speed = FIELD_SPECS
            .iter()
            .find(|s| s.feature == Feature::RotationalSpeed)
            .unwrap();
        assert!(speed.check(1650.5).is_err());
        assert!(speed.check(1650.0).is_ok());
    }

    #[test]
    fn vector_follows_training_order() {
        let r = SensorReadings {
            machine_type: MachineType::H,
            air_temperature: 300.1,
            process_temperature: 310.2,
            rotational_speed: 1500,
            torque: 42.5,
            tool_wear: 120,
        };
        let v = r.to_feature_vector(TypeEncoding::Ordinal);
        assert_eq!(v.0, [2.0, 300.1, 310.2, 1500.0, 42.5, 120.0]);
        let v = r.to_feature_vector(TypeEncoding::Alphabetical);
        assert_eq!(v.get(Feature::Type), 0.0);
    }
}
