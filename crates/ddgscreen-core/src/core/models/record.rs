use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Categorical effect of a mutation on complex stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Stabilizing,
    Destabilizing,
    Neutral,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Stabilizing => "Stabilizing",
            Effect::Destabilizing => "Destabilizing",
            Effect::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the consolidated report: the ΔΔG of a single mutation in a single run.
///
/// `baseline_mean` and `mutant_mean` are already rounded to three decimals and `ddg` to two,
/// so a record read back from a report compares equal to the one that was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DdgRecord {
    pub run_name: String,
    pub mutation: String,
    #[serde(rename = "WT_avg", serialize_with = "three_decimals")]
    pub baseline_mean: f64,
    #[serde(rename = "MUT_avg", serialize_with = "three_decimals")]
    pub mutant_mean: f64,
    #[serde(rename = "ddG", serialize_with = "two_decimals")]
    pub ddg: f64,
    pub effect: Effect,
}

fn three_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.3}", value))
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}
