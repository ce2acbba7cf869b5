//! Typed view of a scoring service response.
//!
//! The allocation block is a closed schema: exactly six asset classes, each
//! with a percentage and an absolute amount. Recommendation lists and the
//! risk profile are optional, and unknown top-level keys are ignored so the
//! service can grow its payload without breaking older clients.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::scoring::ScoringError;

/// The six asset classes the scoring service allocates across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Equity,
    Debt,
    Gold,
    RealEstate,
    Crypto,
    Cash,
}

impl AssetClass {
    pub const ALL: [AssetClass; 6] = [
        AssetClass::Equity,
        AssetClass::Debt,
        AssetClass::Gold,
        AssetClass::RealEstate,
        AssetClass::Crypto,
        AssetClass::Cash,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Equity => "Equity",
            AssetClass::Debt => "Debt",
            AssetClass::Gold => "Gold",
            AssetClass::RealEstate => "Real Estate",
            AssetClass::Crypto => "Crypto",
            AssetClass::Cash => "Cash",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Debt => "debt",
            AssetClass::Gold => "gold",
            AssetClass::RealEstate => "real_estate",
            AssetClass::Crypto => "crypto",
            AssetClass::Cash => "cash",
        }
    }
}

/// One asset class share: a percentage of the portfolio and the matching
/// absolute amount.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AllocationSlice {
    pub percentage: f64,
    pub amount: f64,
}

/// Portfolio split across the six asset classes. Extra keys inside the
/// allocation block are a schema violation and fail deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Allocation {
    pub equity: AllocationSlice,
    pub debt: AllocationSlice,
    pub gold: AllocationSlice,
    pub real_estate: AllocationSlice,
    pub crypto: AllocationSlice,
    pub cash: AllocationSlice,
}

impl Allocation {
    pub fn slice(&self, class: AssetClass) -> &AllocationSlice {
        match class {
            AssetClass::Equity => &self.equity,
            AssetClass::Debt => &self.debt,
            AssetClass::Gold => &self.gold,
            AssetClass::RealEstate => &self.real_estate,
            AssetClass::Crypto => &self.crypto,
            AssetClass::Cash => &self.cash,
        }
    }

    pub fn entries(&self) -> [(AssetClass, &AllocationSlice); 6] {
        [
            (AssetClass::Equity, &self.equity),
            (AssetClass::Debt, &self.debt),
            (AssetClass::Gold, &self.gold),
            (AssetClass::RealEstate, &self.real_estate),
            (AssetClass::Crypto, &self.crypto),
            (AssetClass::Cash, &self.cash),
        ]
    }

    pub fn total_amount(&self) -> f64 {
        self.entries().iter().map(|(_, slice)| slice.amount).sum()
    }
}

/// A single instrument suggestion within one recommendation list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    pub weight: f64,
    pub amount: f64,
}

impl Recommendation {
    /// Human-facing name, falling back to the symbol when the service sends
    /// none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Full scoring response, timestamped at the moment it was parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResult {
    pub allocation: Allocation,
    #[serde(default)]
    pub equity_recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub bond_recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub crypto_recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub currency_recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub risk_profile: Option<String>,
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl SubmissionResult {
    /// Decodes and validates a raw response body.
    pub fn parse(body: &str) -> Result<Self, ScoringError> {
        let result: SubmissionResult = serde_json::from_str(body)
            .map_err(|err| ScoringError::Malformed(err.to_string()))?;
        result.validate()?;
        Ok(result)
    }

    /// Rejects non-finite or negative numbers anywhere in the payload.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (class, slice) in self.allocation.entries() {
            check_non_negative(slice.percentage, class.key(), "percentage")?;
            check_non_negative(slice.amount, class.key(), "amount")?;
        }
        for (label, recommendations) in self.recommendation_sets() {
            for recommendation in recommendations {
                check_non_negative(recommendation.weight, label, "weight")?;
                check_non_negative(recommendation.amount, label, "amount")?;
            }
        }
        Ok(())
    }

    /// The four recommendation lists with their section labels, in render
    /// order.
    pub fn recommendation_sets(&self) -> [(&'static str, &[Recommendation]); 4] {
        [
            ("Equity Recommendations", &self.equity_recommendations),
            ("Bond Recommendations", &self.bond_recommendations),
            ("Crypto Recommendations", &self.crypto_recommendations),
            ("Currency Recommendations", &self.currency_recommendations),
        ]
    }

    pub fn recommendation_count(&self) -> usize {
        self.recommendation_sets()
            .iter()
            .map(|(_, list)| list.len())
            .sum()
    }
}

fn check_non_negative(value: f64, section: &str, field: &str) -> Result<(), ScoringError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ScoringError::Malformed(format!(
            "{section}: {field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
