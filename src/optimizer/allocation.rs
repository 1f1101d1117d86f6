use std::fmt;

use serde::Serialize;

/// Which scenario produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScenarioSource {
    #[serde(rename = "Main Quadratic")]
    MainQuadratic,
    #[serde(rename = "All Attack (x=S)")]
    AllAttack,
    #[serde(rename = "All Crit Rate (y=S)")]
    AllCritRate,
    #[serde(rename = "All Crit Damage (z=S)")]
    AllCritDamage,
    #[serde(rename = "No Attack (x=0)")]
    NoAttack,
    #[serde(rename = "CR Capped (y=y_cap)")]
    CritRateCapped,
}

impl ScenarioSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MainQuadratic => "Main Quadratic",
            Self::AllAttack => "All Attack (x=S)",
            Self::AllCritRate => "All Crit Rate (y=S)",
            Self::AllCritDamage => "All Crit Damage (z=S)",
            Self::NoAttack => "No Attack (x=0)",
            Self::CritRateCapped => "CR Capped (y=y_cap)",
        }
    }
}

impl fmt::Display for ScenarioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A continuous stationary point before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ContinuousPoint {
    pub fn is_feasible(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.z >= 0.0
    }
}

/// An integer build and its damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Allocation {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub damage: f64,
    pub source: ScenarioSource,
}

impl Allocation {
    pub fn total_points(&self) -> i64 {
        self.x + self.y + self.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_serializes_as_its_label() {
        for source in [
            ScenarioSource::MainQuadratic,
            ScenarioSource::AllAttack,
            ScenarioSource::AllCritRate,
            ScenarioSource::AllCritDamage,
            ScenarioSource::NoAttack,
            ScenarioSource::CritRateCapped,
        ] {
            let json = serde_json::to_string(&source).expect("serializable");
            assert_eq!(json, format!("\"{}\"", source.label()));
        }
    }
}
