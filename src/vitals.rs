use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PATIENT_ID: &str = "patient_001";

/// One simulated vitals reading. Created fresh per emission, serialized
/// immediately and never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VitalsRecord {
    pub timestamp: String,
    pub patient_id: String,
    pub heart_rate: i64,
    pub systolic_bp: i64,
    pub diastolic_bp: i64,
    pub spo2: f64,
}

/// Generates one vitals reading for `patient_id`.
///
/// The timestamp is the current UTC wall-clock time at second precision
/// (`YYYY-MM-DDTHH:MM:SSZ`). Every vital sign is an independent uniform
/// draw from its plausible range:
/// - `heart_rate`: 50..=120 bpm
/// - `systolic_bp`: 90..=160 mmHg
/// - `diastolic_bp`: 60..=100 mmHg
/// - `spo2`: 85.0..=100.0 %, rounded to 2 decimal places
pub fn generate(patient_id: &str) -> VitalsRecord {
    let mut rng = rand::rng();

    VitalsRecord {
        timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        patient_id: patient_id.to_string(),
        heart_rate: rng.random_range(50..=120),
        systolic_bp: rng.random_range(90..=160),
        diastolic_bp: rng.random_range(60..=100),
        spo2: (rng.random_range(85.0..=100.0_f64) * 100.0).round() / 100.0,
    }
}
