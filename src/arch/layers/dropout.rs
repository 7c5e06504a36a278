use ndarray::Array1;

/// Dropout as it behaves in evaluation mode: the identity.
///
/// Kept in the stack so layer positions line up with the trained state dict.
#[derive(Debug, Clone, Copy)]
pub struct Dropout {
    p: f64,
}

impl Dropout {
    pub fn new(p: f64) -> Self {
        Self { p }
    }

    /// The drop probability used while training.
    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn forward(&self, x: Array1<f64>) -> Array1<f64> {
        x
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn evaluation_mode_is_the_identity() {
        let dropout = Dropout::new(0.2);
        assert_eq!(dropout.p(), 0.2);
        assert_eq!(dropout.forward(array![1., -2., 3.]), array![1., -2., 3.]);
    }
}
