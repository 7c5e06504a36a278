use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};

use crate::{
    features::{FeatureVector, FEATURE_COUNT},
    Result, SentinelErr,
};

/// On-disk shape of the standardization statistics: the fitted scaler's `mean_` and `scale_`.
///
/// Unknown fields written by the training side (`var`, `n_features_in`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Per-feature standardization statistics fixed at training time.
///
/// Invariants: both arrays hold exactly [`FEATURE_COUNT`] values and every scale is strictly
/// positive. They are checked once here, so normalizing never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerArtifact", into = "ScalerArtifact")]
pub struct NormalizationParams {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl NormalizationParams {
    /// Creates a new `NormalizationParams`.
    ///
    /// # Args
    /// * `mean` - The per-feature mean.
    /// * `scale` - The per-feature standard deviation.
    ///
    /// # Errors
    /// `SentinelErr::Config` if either array does not hold 41 values, a mean is not finite or a
    /// scale is not strictly positive and finite.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        for (what, values) in [("mean", &mean), ("scale", &scale)] {
            if values.len() != FEATURE_COUNT {
                return Err(SentinelErr::config(format!(
                    "normalization {what} has {} values, expected {FEATURE_COUNT}",
                    values.len()
                )));
            }
        }

        if let Some((i, m)) = mean.iter().enumerate().find(|(_, m)| !m.is_finite()) {
            return Err(SentinelErr::config(format!(
                "normalization mean[{i}] is {m}, it must be finite"
            )));
        }

        // NaN fails the comparison as well.
        if let Some((i, s)) = scale
            .iter()
            .enumerate()
            .find(|(_, s)| !(**s > 0.0 && s.is_finite()))
        {
            return Err(SentinelErr::config(format!(
                "normalization scale[{i}] is {s}, it must be strictly positive and finite"
            )));
        }

        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    /// Statistics that leave every feature untouched (zero mean, unit scale).
    pub fn identity() -> Self {
        Self {
            mean: Array1::zeros(FEATURE_COUNT),
            scale: Array1::ones(FEATURE_COUNT),
        }
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }

    /// Standardizes a feature vector: `out[i] = (v[i] - mean[i]) / scale[i]`.
    pub fn normalize(&self, v: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];

        Zip::from(&mut out[..])
            .and(v.view())
            .and(&self.mean)
            .and(&self.scale)
            .for_each(|o, &x, &m, &s| *o = (x - m) / s);

        FeatureVector::new(out)
    }
}

impl TryFrom<ScalerArtifact> for NormalizationParams {
    type Error = SentinelErr;

    fn try_from(artifact: ScalerArtifact) -> Result<Self> {
        Self::new(artifact.mean, artifact.scale)
    }
}

impl From<NormalizationParams> for ScalerArtifact {
    fn from(params: NormalizationParams) -> Self {
        Self {
            mean: params.mean.to_vec(),
            scale: params.scale.to_vec(),
        }
    }
}
