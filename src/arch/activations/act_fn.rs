use super::{Relu, Sigmoid};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActFn {
    Relu(Relu),
    Sigmoid(Sigmoid),
}

impl ActFn {
    pub fn relu() -> Self {
        Self::Relu(Relu)
    }

    pub fn sigmoid() -> Self {
        Self::Sigmoid(Sigmoid)
    }

    pub fn f(&self, x: f64) -> f64 {
        match self {
            Self::Relu(a) => a.f(x),
            Self::Sigmoid(a) => a.f(x),
        }
    }
}
