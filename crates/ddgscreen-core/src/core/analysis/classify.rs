use crate::core::models::record::Effect;

pub const DEFAULT_STABILIZING_THRESHOLD: f64 = -1.0;
pub const DEFAULT_DESTABILIZING_THRESHOLD: f64 = 1.0;

/// Cut-offs separating the three effect classes.
///
/// Comparisons are strict on both sides: a ΔΔG equal to either threshold is `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectThresholds {
    pub stabilizing: f64,
    pub destabilizing: f64,
}

impl Default for EffectThresholds {
    fn default() -> Self {
        Self {
            stabilizing: DEFAULT_STABILIZING_THRESHOLD,
            destabilizing: DEFAULT_DESTABILIZING_THRESHOLD,
        }
    }
}

impl EffectThresholds {
    pub fn is_valid(&self) -> bool {
        self.stabilizing.is_finite()
            && self.destabilizing.is_finite()
            && self.stabilizing <= self.destabilizing
    }

    pub fn classify(&self, ddg: f64) -> Effect {
        if ddg < self.stabilizing {
            Effect::Stabilizing
        } else if ddg > self.destabilizing {
            Effect::Destabilizing
        } else {
            Effect::Neutral
        }
    }
}

/// Classifies with the default thresholds of ±1.0 kcal/mol.
pub fn classify(ddg: f64) -> Effect {
    EffectThresholds::default().classify(ddg)
}
