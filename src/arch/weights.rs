use ndarray::{Array1, Array2};

use crate::{features::FEATURE_COUNT, Result, SentinelErr};

/// `(inputs, outputs)` of each affine transform, in evaluation order.
pub const LAYER_DIMS: [(usize, usize); 4] = [(FEATURE_COUNT, 64), (64, 32), (32, 16), (16, 1)];

/// Weights and biases of a single affine transform `z = W·x + b`.
///
/// `weight` is laid out `(outputs, inputs)`, the same as a trained linear layer's state.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParams {
    pub weight: Array2<f64>,
    pub bias: Array1<f64>,
}

impl LinearParams {
    pub fn new(weight: Array2<f64>, bias: Array1<f64>) -> Self {
        Self { weight, bias }
    }

    /// Returns the amount of scalar parameters in this transform.
    pub fn size(&self) -> usize {
        self.weight.len() + self.bias.len()
    }

    fn check(&self, (inputs, outputs): (usize, usize)) -> Result<()> {
        let (rows, cols) = self.weight.dim();
        SentinelErr::check_shape("weight rows", rows, outputs)?;
        SentinelErr::check_shape("weight columns", cols, inputs)?;
        SentinelErr::check_shape("bias length", self.bias.len(), outputs)
    }
}

/// The trained parameters of the scoring network, checked against [`LAYER_DIMS`].
///
/// Immutable once built; shared read-only by every scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkWeights {
    layers: Vec<LinearParams>,
}

impl NetworkWeights {
    /// Creates a new `NetworkWeights`.
    ///
    /// # Args
    /// * `layers` - The four affine transforms, first to last.
    ///
    /// # Errors
    /// `SentinelErr::Shape` if there are not exactly four transforms or any matrix or bias does
    /// not match the fixed topology.
    pub fn new(layers: Vec<LinearParams>) -> Result<Self> {
        SentinelErr::check_shape("layers", layers.len(), LAYER_DIMS.len())?;

        for (layer, dims) in layers.iter().zip(LAYER_DIMS) {
            layer.check(dims)?;
        }

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[LinearParams] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<LinearParams> {
        self.layers
    }

    /// Returns the amount of scalar parameters across all transforms.
    pub fn num_params(&self) -> usize {
        self.layers.iter().map(LinearParams::size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros() -> Vec<LinearParams> {
        LAYER_DIMS
            .iter()
            .map(|&(i, o)| LinearParams::new(Array2::zeros((o, i)), Array1::zeros(o)))
            .collect()
    }

    #[test]
    fn accepts_the_fixed_topology() {
        let weights = NetworkWeights::new(zeros()).unwrap();
        assert_eq!(weights.num_params(), 64 * 41 + 64 + 32 * 64 + 32 + 16 * 32 + 16 + 16 + 1);
    }

    #[test]
    fn rejects_transposed_matrix() {
        let mut layers = zeros();
        layers[0].weight = Array2::zeros((41, 64));

        let err = NetworkWeights::new(layers).unwrap_err();
        assert!(matches!(
            err,
            SentinelErr::Shape {
                what: "weight rows",
                got: 41,
                expected: 64
            }
        ));
    }

    #[test]
    fn rejects_wrong_bias() {
        let mut layers = zeros();
        layers[3].bias = Array1::zeros(2);
        assert!(NetworkWeights::new(layers).is_err());
    }

    #[test]
    fn rejects_missing_layer() {
        let mut layers = zeros();
        layers.pop();

        let err = NetworkWeights::new(layers).unwrap_err();
        assert!(matches!(
            err,
            SentinelErr::Shape {
                what: "layers",
                got: 3,
                expected: 4
            }
        ));
    }
}
