//! Model input: the six sensor features in training order.

mod readings;

pub use readings::{FieldSpec, SensorReadings, FIELD_SPECS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of features the scaler and classifier were fitted on
pub const FEATURE_COUNT: usize = 6;

/// Feature positions in training order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Type,
    AirTemperature,
    ProcessTemperature,
    RotationalSpeed,
    Torque,
    ToolWear,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Type,
        Feature::AirTemperature,
        Feature::ProcessTemperature,
        Feature::RotationalSpeed,
        Feature::Torque,
        Feature::ToolWear,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used when the model was trained
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::Type => "Type",
            Feature::AirTemperature => "Air temperature [K]",
            Feature::ProcessTemperature => "Process temperature [K]",
            Feature::RotationalSpeed => "Rotational speed [rpm]",
            Feature::Torque => "Torque [Nm]",
            Feature::ToolWear => "Tool wear [min]",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Fixed-size feature vector for model input, unscaled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Copy with one feature replaced
    pub fn with(&self, feature: Feature, value: f64) -> Self {
        let mut out = *self;
        out.0[feature.index()] = value;
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineType {
    L,
    M,
    H,
}

impl MachineType {
    pub const ALL: [MachineType; 3] = [MachineType::L, MachineType::M, MachineType::H];

    pub fn encode(self, encoding: TypeEncoding) -> f64 {
        let code = match (encoding, self) {
            (TypeEncoding::Ordinal, MachineType::L) => 0,
            (TypeEncoding::Ordinal, MachineType::M) => 1,
            (TypeEncoding::Ordinal, MachineType::H) => 2,
            (TypeEncoding::Alphabetical, MachineType::H) => 0,
            (TypeEncoding::Alphabetical, MachineType::L) => 1,
            (TypeEncoding::Alphabetical, MachineType::M) => 2,
        };
        f64::from(code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MachineType::L => "L",
            MachineType::M => "M",
            MachineType::H => "H",
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(MachineType::L),
            "M" => Ok(MachineType::M),
            "H" => Ok(MachineType::H),
            other => Err(format!("unknown machine type '{}' (expected L, M or H)", other)),
        }
    }
}

/// Integer code assigned to the machine type. Must match the encoding used at training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeEncoding {
    /// L=0, M=1, H=2
    #[default]
    Ordinal,
    /// H=0, L=1, M=2 (label-encoder order)
    Alphabetical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_encoding() {
        assert_eq!(MachineType::L.encode(TypeEncoding::Ordinal), 0.0);
        assert_eq!(MachineType::M.encode(TypeEncoding::Ordinal), 1.0);
        assert_eq!(MachineType::H.encode(TypeEncoding::Ordinal), 2.0);
    }

    #[test]
    fn alphabetical_encoding() {
        assert_eq!(MachineType::H.encode(TypeEncoding::Alphabetical), 0.0);
        assert_eq!(MachineType::L.encode(TypeEncoding::Alphabetical), 1.0);
        assert_eq!(MachineType::M.encode(TypeEncoding::Alphabetical), 2.0);
    }

    #[test]
    fn encodings_disagree_on_every_type() {
        for t in MachineType::ALL {
            assert_ne!(
                t.encode(TypeEncoding::Ordinal),
                t.encode(TypeEncoding::Alphabetical),
                "{} encodes the same under both schemes",
                t
            );
        }
    }

    #[test]
    fn parse_machine_type() {
        assert_eq!("m".parse::<MachineType>().unwrap(), MachineType::M);
        assert_eq!(" H ".parse::<MachineType>().unwrap(), MachineType::H);
        assert!("X".parse::<MachineType>().is_err());
    }

    #[test]
    fn feature_order_matches_indices() {
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
        assert_eq!(Feature::ToolWear.column_name(), "Tool wear [min]");
    }

    #[test]
    fn with_replaces_single_feature() {
        let v = FeatureVector([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let w = v.with(Feature::Torque, 40.0);
        assert_eq!(w.0, [1.0, 2.0, 3.0, 4.0, 40.0, 6.0]);
        assert_eq!(v.get(Feature::Torque), 5.0);
    }
}
