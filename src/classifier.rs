use std::fmt;

use log::debug;
use serde::Serialize;

use crate::{
    arch::{NetworkWeights, ScoringNetwork},
    artifacts,
    config::ArtifactConfig,
    features,
    normalize::NormalizationParams,
    Result,
};

/// Scores above this are flagged as spoofed.
pub const SPOOF_THRESHOLD: f64 = 0.5;

/// Scores above this are a high threat.
pub const HIGH_THREAT_THRESHOLD: f64 = 0.8;

/// The only anomaly tag produced, attached to every flagged URL regardless of which features
/// fired.
pub const LEXICAL_ANOMALY: &str = "URL Lexical Pattern Match";

/// Three-tier discretization of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verdict for a single URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub is_spoof: bool,
    #[serde(rename = "confidence_score")]
    pub confidence: f64,
    pub threat_level: ThreatLevel,
    #[serde(rename = "detected_anomalies")]
    pub anomalies: Vec<String>,
}

/// Turns a confidence score into a verdict.
///
/// Both thresholds are strict: exactly `0.5` is not spoofed and exactly `0.8` is a medium
/// threat.
pub fn decide(confidence: f64) -> ScoreResult {
    let is_spoof = confidence > SPOOF_THRESHOLD;

    let threat_level = if confidence > HIGH_THREAT_THRESHOLD {
        ThreatLevel::High
    } else if is_spoof {
        ThreatLevel::Medium
    } else {
        ThreatLevel::Low
    };

    let anomalies = if is_spoof {
        vec![LEXICAL_ANOMALY.to_string()]
    } else {
        Vec::new()
    };

    ScoreResult {
        is_spoof,
        confidence,
        threat_level,
        anomalies,
    }
}

/// The full scoring pipeline: extract, normalize, score, decide.
///
/// Holds only immutable state, so `&Classifier` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    scaler: NormalizationParams,
    network: ScoringNetwork,
}

impl Classifier {
    /// Creates a new `Classifier`.
    ///
    /// # Args
    /// * `scaler` - The standardization statistics the network was trained with.
    /// * `weights` - The trained network parameters.
    ///
    /// # Returns
    /// A new `Classifier` instance.
    pub fn new(scaler: NormalizationParams, weights: NetworkWeights) -> Self {
        Self {
            scaler,
            network: ScoringNetwork::new(weights),
        }
    }

    /// Loads both artifacts named by `config`.
    ///
    /// # Errors
    /// `SentinelErr::Config` if either artifact is missing or malformed.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let scaler = artifacts::load_scaler(&config.scaler_path())?;
        let weights = artifacts::load_weights(&config.weights_path())?;
        Ok(Self::new(scaler, weights))
    }

    pub fn scaler(&self) -> &NormalizationParams {
        &self.scaler
    }

    pub fn network(&self) -> &ScoringNetwork {
        &self.network
    }

    /// Computes the phishing probability of `url`.
    ///
    /// # Errors
    /// `SentinelErr::Shape` only if an internal dimension invariant is broken.
    pub fn confidence(&self, url: &str) -> Result<f64> {
        let features = features::extract(url);
        let normalized = self.scaler.normalize(&features);
        self.network.score(normalized.view())
    }

    /// Classifies `url`.
    ///
    /// # Errors
    /// `SentinelErr::Shape` only if an internal dimension invariant is broken.
    pub fn classify(&self, url: &str) -> Result<ScoreResult> {
        let result = decide(self.confidence(url)?);

        debug!(
            confidence = result.confidence,
            threat_level = result.threat_level.as_str();
            "classified url"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2};

    use super::*;
    use crate::arch::{LinearParams, LAYER_DIMS};

    #[test]
    fn exactly_one_half_is_not_spoofed() {
        let r = decide(0.5);
        assert!(!r.is_spoof);
        assert_eq!(r.threat_level, ThreatLevel::Low);
        assert!(r.anomalies.is_empty());
    }

    #[test]
    fn just_above_one_half_is_medium() {
        let r = decide(0.5000001);
        assert!(r.is_spoof);
        assert_eq!(r.threat_level, ThreatLevel::Medium);
        assert_eq!(r.anomalies, vec![LEXICAL_ANOMALY.to_string()]);
    }

    #[test]
    fn exactly_point_eight_is_medium() {
        assert_eq!(decide(0.8).threat_level, ThreatLevel::Medium);
    }

    #[test]
    fn just_above_point_eight_is_high() {
        let r = decide(0.8000001);
        assert!(r.is_spoof);
        assert_eq!(r.threat_level, ThreatLevel::High);
        assert_eq!(r.anomalies, vec!["URL Lexical Pattern Match".to_string()]);
    }

    #[test]
    fn extremes() {
        assert_eq!(decide(0.).threat_level, ThreatLevel::Low);
        assert_eq!(decide(1.).threat_level, ThreatLevel::High);
    }

    #[test]
    fn serializes_to_the_response_schema() {
        let json = serde_json::to_value(decide(0.9)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "is_spoof": true,
                "confidence_score": 0.9,
                "threat_level": "high",
                "detected_anomalies": ["URL Lexical Pattern Match"],
            })
        );
    }

    #[test]
    fn pipeline_feeds_the_last_bias_through_sigmoid() {
        let layers = LAYER_DIMS
            .iter()
            .map(|&(i, o)| LinearParams::new(Array2::zeros((o, i)), Array1::from_elem(o, 3.)))
            .collect();
        let weights = NetworkWeights::new(layers).unwrap();
        let classifier = Classifier::new(NormalizationParams::identity(), weights);

        let r = classifier.classify("https://www.google.com/search?q=sentinel").unwrap();
        assert_eq!(r.confidence, 1. / (1. + (-3f64).exp()));
        assert_eq!(r.threat_level, ThreatLevel::High);
    }
}
