use ndarray::{Array1, ArrayView1};

use super::{activations::ActFn, layers::Layer, NetworkWeights, LAYER_DIMS};
use crate::{features::FEATURE_COUNT, Result, SentinelErr};

/// Drop probability the first hidden layer was trained with. Only kept for reference, since
/// dropout is the identity when scoring.
const HIDDEN_DROPOUT: f64 = 0.2;

/// The fixed 41→64→32→16→1 feed-forward classifier, evaluation mode only.
///
/// The stack mirrors the trained sequential module: dense+ReLU, dropout, dense+ReLU,
/// dense+ReLU, dense+sigmoid. Evaluation never mutates the layers, so a single network can be
/// shared by any amount of concurrent callers.
#[derive(Debug, Clone)]
pub struct ScoringNetwork {
    layers: Vec<Layer>,
}

impl ScoringNetwork {
    /// Creates a new `ScoringNetwork` from already validated weights.
    ///
    /// # Args
    /// * `weights` - The trained parameters.
    ///
    /// # Returns
    /// A new `ScoringNetwork` instance.
    pub fn new(weights: NetworkWeights) -> Self {
        let last = LAYER_DIMS.len() - 1;
        let mut layers = Vec::with_capacity(LAYER_DIMS.len() + 1);

        for (i, params) in weights.into_layers().into_iter().enumerate() {
            let act_fn = if i == last {
                ActFn::sigmoid()
            } else {
                ActFn::relu()
            };
            layers.push(Layer::dense(params, Some(act_fn)));

            if i == 0 {
                layers.push(Layer::dropout(HIDDEN_DROPOUT));
            }
        }

        Self { layers }
    }

    /// Returns the amount of parameters in the network.
    pub fn size(&self) -> usize {
        self.layers.iter().map(Layer::size).sum()
    }

    /// Makes a forward pass through the network.
    ///
    /// # Args
    /// * `x` - A normalized feature vector.
    ///
    /// # Returns
    /// The output activations, or a shape error.
    pub fn forward(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        SentinelErr::check_shape("input features", x.len(), FEATURE_COUNT)?;

        self.layers
            .iter()
            .try_fold(x.to_owned(), |x, layer| layer.forward(x))
    }

    /// Scores a normalized feature vector.
    ///
    /// # Args
    /// * `x` - A normalized feature vector.
    ///
    /// # Returns
    /// The phishing probability in `[0, 1]`.
    ///
    /// # Errors
    /// `SentinelErr::Shape` if `x` does not hold exactly 41 values.
    pub fn score(&self, x: ArrayView1<f64>) -> Result<f64> {
        let out = self.forward(x)?;
        SentinelErr::check_shape("network output", out.len(), 1)?;
        Ok(out[0])
    }
}
