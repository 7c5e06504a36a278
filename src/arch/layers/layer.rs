use ndarray::Array1;

use super::{Dense, Dropout};
use crate::{
    arch::{activations::ActFn, LinearParams},
    Result,
};

#[derive(Debug, Clone)]
pub enum Layer {
    Dense(Dense),
    Dropout(Dropout),
}
use Layer::*;

impl Layer {
    pub fn dense(params: LinearParams, act_fn: Option<ActFn>) -> Self {
        Self::Dense(Dense::new(params, act_fn))
    }

    pub fn dropout(p: f64) -> Self {
        Self::Dropout(Dropout::new(p))
    }

    pub fn size(&self) -> usize {
        match self {
            Dense(l) => l.size(),
            Dropout(_) => 0,
        }
    }

    pub fn forward(&self, x: Array1<f64>) -> Result<Array1<f64>> {
        match self {
            Dense(l) => l.forward(x.view()),
            Dropout(l) => Ok(l.forward(x)),
        }
    }
}
