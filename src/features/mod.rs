mod entropy;
mod extractor;
pub mod url;
mod vector;

pub use entropy::shannon_entropy;
pub use extractor::extract;
pub use vector::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
