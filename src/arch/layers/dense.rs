use ndarray::{Array1, ArrayView1};

use crate::{
    arch::{activations::ActFn, LinearParams},
    Result, SentinelErr,
};

/// An affine transform optionally followed by an activation function.
#[derive(Debug, Clone)]
pub struct Dense {
    params: LinearParams,
    act_fn: Option<ActFn>,
}

impl Dense {
    pub fn new(params: LinearParams, act_fn: Option<ActFn>) -> Self {
        Self { params, act_fn }
    }

    /// Returns the size of this layer.
    ///
    /// # Returns
    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.params.size()
    }

    /// Computes `act_fn(W·x + b)`.
    ///
    /// # Errors
    /// `SentinelErr::Shape` if `x` does not have as many entries as the layer has inputs.
    pub fn forward(&self, x: ArrayView1<f64>) -> Result<Array1<f64>> {
        let LinearParams { weight, bias } = &self.params;
        SentinelErr::check_shape("dense input", x.len(), weight.ncols())?;

        let z = weight.dot(&x) + bias;

        let Some(act_fn) = self.act_fn else {
            return Ok(z);
        };

        Ok(z.mapv_into(|z| act_fn.f(z)))
    }
}
