use std::collections::BTreeMap;

use serde::Serialize;

use super::ProfileError;

pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 10;

/// Normalized risk preference score in `[0, 1]`.
///
/// The questionnaire collects a 1–10 answer; it is converted on entry and the
/// normalized value is the only representation that crosses the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RiskScore(f64);

impl RiskScore {
    /// Converts a 1–10 questionnaire answer into a normalized score.
    pub fn from_scale(scale: u8) -> Option<Self> {
        if (SCALE_MIN..=SCALE_MAX).contains(&scale) {
            Some(Self(f64::from(scale) / f64::from(SCALE_MAX)))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Risk attitude collected in the second questionnaire step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreferenceProfile {
    pub confidence: RiskScore,
    pub knowledge: RiskScore,
    pub comfort_with_negatives: RiskScore,
    pub market_awareness: RiskScore,
}

impl PreferenceProfile {
    pub fn from_values(values: &BTreeMap<String, String>) -> Result<Self, ProfileError> {
        Ok(Self {
            confidence: parse_scale(values, "confidence")?,
            knowledge: parse_scale(values, "knowledge")?,
            comfort_with_negatives: parse_scale(values, "comfort_with_negatives")?,
            market_awareness: parse_scale(values, "market_awareness")?,
        })
    }
}

fn parse_scale(
    values: &BTreeMap<String, String>,
    field: &'static str,
) -> Result<RiskScore, ProfileError> {
    let raw = values
        .get(field)
        .map(|value| value.as_str())
        .ok_or(ProfileError::Missing(field))?;
    let scale = raw
        .trim()
        .parse::<u8>()
        .map_err(|_| ProfileError::invalid(field, "expected a whole number"))?;
    RiskScore::from_scale(scale).ok_or_else(|| {
        ProfileError::invalid(
            field,
            format!("must be between {} and {}", SCALE_MIN, SCALE_MAX),
        )
    })
}
