/// Logistic squash into `(0, 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sigmoid;

impl Sigmoid {
    pub fn f(&self, z: f64) -> f64 {
        1. / (1. + (-z).exp())
    }
}
