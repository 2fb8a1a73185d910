//! Pose samples: one sensor reading of position, velocity, acceleration and
//! angular velocity.
//!
//! Field order on the wire is fixed:
//! `px py pz vx vy vz ax ay az gx gy gz`.

use serde::{Deserialize, Serialize};

/// Number of scalar fields in one pose sample.
pub const POSE_FIELD_COUNT: usize = 12;

/// Short field names in wire order.
pub const FIELD_NAMES: [&str; POSE_FIELD_COUNT] = [
    "px", "py", "pz", "vx", "vy", "vz", "ax", "ay", "az", "gx", "gy", "gz",
];

/// One pose reading. Units: m, m/s, m/s², rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PoseSampleRepr")]
pub struct PoseSample {
    #[serde(rename = "translation")]
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub acceleration: [f32; 3],
    pub angular_velocity: [f32; 3],
}

impl PoseSample {
    pub fn new(
        position: [f32; 3],
        velocity: [f32; 3],
        acceleration: [f32; 3],
        angular_velocity: [f32; 3],
    ) -> Self {
        Self {
            position,
            velocity,
            acceleration,
            angular_velocity,
        }
    }

    /// Build a sample from the flat wire-order array.
    pub fn from_array(values: [f32; POSE_FIELD_COUNT]) -> Self {
        let [px, py, pz, vx, vy, vz, ax, ay, az, gx, gy, gz] = values;
        Self {
            position: [px, py, pz],
            velocity: [vx, vy, vz],
            acceleration: [ax, ay, az],
            angular_velocity: [gx, gy, gz],
        }
    }

    /// Flatten to wire order.
    pub fn to_array(&self) -> [f32; POSE_FIELD_COUNT] {
        let [px, py, pz] = self.position;
        let [vx, vy, vz] = self.velocity;
        let [ax, ay, az] = self.acceleration;
        let [gx, gy, gz] = self.angular_velocity;
        [px, py, pz, vx, vy, vz, ax, ay, az, gx, gy, gz]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }
}

impl From<[f32; POSE_FIELD_COUNT]> for PoseSample {
    fn from(values: [f32; POSE_FIELD_COUNT]) -> Self {
        Self::from_array(values)
    }
}

/// Accepted input shapes: the sensor's named triples, or a flat array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PoseSampleRepr {
    Named {
        #[serde(alias = "position")]
        translation: [f32; 3],
        velocity: [f32; 3],
        acceleration: [f32; 3],
        angular_velocity: [f32; 3],
    },
    Flat([f32; POSE_FIELD_COUNT]),
}

impl From<PoseSampleRepr> for PoseSample {
    fn from(repr: PoseSampleRepr) -> Self {
        match repr {
            PoseSampleRepr::Named {
                translation,
                velocity,
                acceleration,
                angular_velocity,
            } => Self::new(translation, velocity, acceleration, angular_velocity),
            PoseSampleRepr::Flat(values) => Self::from_array(values),
        }
    }
}
