//! Lexical phishing scoring for URLs.
//!
//! A URL is turned into 41 lexical features, standardized with the statistics the network was
//! trained with, and scored by a small feed-forward network. The resulting probability is
//! discretized into a spoof flag and a threat level.

pub mod arch;
pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod normalize;
pub mod sentinel;

pub use classifier::{decide, Classifier, ScoreResult, ThreatLevel};
pub use config::ArtifactConfig;
pub use error::{Result, SentinelErr};
pub use features::{extract, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use normalize::NormalizationParams;
pub use sentinel::{classify, global, load_assets, Sentinel};
