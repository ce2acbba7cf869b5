//! Blocking HTTP adapter for the scoring service.
//!
//! The client posts the flattened questionnaire payload as JSON and decodes
//! the allocation response. Server rejections keep the raw body so the shell
//! can show the operator what the service actually said.

mod result;

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::profile::{BasicProfile, PreferenceProfile};

pub use result::{AllocationSlice, Allocation, AssetClass, Recommendation, SubmissionResult};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("could not reach the scoring service: {0}")]
    Network(#[from] reqwest::Error),
    #[error("scoring service rejected the submission (HTTP {status})")]
    Server { status: u16, body: String },
    #[error("scoring service sent an unusable response: {0}")]
    Malformed(String),
}

/// Flat wire payload the scoring endpoint expects: the eight basic fields
/// plus the four normalized preference scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringRequest {
    pub age: u32,
    pub income: f64,
    pub capital: f64,
    pub expenses: f64,
    pub emi: f64,
    #[serde(rename = "liquidity_need")]
    pub liquidity: f64,
    pub dependents: u32,
    pub experience: u32,
    pub confidence: f64,
    pub knowledge: f64,
    pub comfort_with_negatives: f64,
    pub market_awareness: f64,
}

impl ScoringRequest {
    pub fn from_profiles(basic: &BasicProfile, preferences: &PreferenceProfile) -> Self {
        Self {
            age: basic.age,
            income: basic.income,
            capital: basic.capital,
            expenses: basic.expenses,
            emi: basic.emi,
            liquidity: basic.liquidity,
            dependents: basic.dependents,
            experience: basic.experience,
            confidence: preferences.confidence.value(),
            knowledge: preferences.knowledge.value(),
            comfort_with_negatives: preferences.comfort_with_negatives.value(),
            market_awareness: preferences.market_awareness.value(),
        }
    }
}

pub struct ScoringClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl ScoringClient {
    pub fn from_config(config: &Config) -> Result<Self, ScoringError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.submit_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts one submission and decodes the allocation response.
    pub fn submit(&self, request: &ScoringRequest) -> Result<SubmissionResult, ScoringError> {
        let request_id = Uuid::new_v4();
        tracing::info!(%request_id, endpoint = %self.endpoint, "submitting investor profile");

        let response = self.client.post(&self.endpoint).json(request).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            tracing::warn!(%request_id, status = status.as_u16(), "scoring service returned an error");
            return Err(ScoringError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let result = SubmissionResult::parse(&body)?;
        tracing::info!(
            %request_id,
            recommendations = result.recommendation_count(),
            "received allocation"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RiskScore;

    fn sample_request() -> ScoringRequest {
        ScoringRequest {
            age: 45,
            income: 240_000.0,
            capital: 100_000.0,
            expenses: 100_000.0,
            emi: 80_000.0,
            liquidity: 0.0,
            dependents: 4,
            experience: 0,
            confidence: 0.1,
            knowledge: 0.1,
            comfort_with_negatives: 0.1,
            market_awareness: 0.1,
        }
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["liquidity_need"], 0.0);
        assert_eq!(json["comfort_with_negatives"], 0.1);
        assert_eq!(json["age"], 45);
        assert!(json.get("liquidity").is_none());
    }

    #[test]
    fn request_is_built_from_typed_profiles() {
        let basic = BasicProfile {
            age: 30,
            income: 50_000.0,
            capital: 20_000.0,
            expenses: 18_000.0,
            emi: 0.0,
            liquidity: 25.0,
            dependents: 0,
            experience: 5,
        };
        let preferences = PreferenceProfile {
            confidence: RiskScore::from_scale(8).unwrap(),
            knowledge: RiskScore::from_scale(6).unwrap(),
            comfort_with_negatives: RiskScore::from_scale(7).unwrap(),
            market_awareness: RiskScore::from_scale(9).unwrap(),
        };
        let request = ScoringRequest::from_profiles(&basic, &preferences);
        assert_eq!(request.age, 30);
        assert!((request.confidence - 0.8).abs() < f64::EPSILON);
        assert!((request.market_awareness - 0.9).abs() < f64::EPSILON);
        assert_eq!(request.liquidity, 25.0);
    }

    #[test]
    fn client_endpoint_comes_from_config() {
        let config = Config::default();
        let client = ScoringClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/api/submit-form/");
    }
}
