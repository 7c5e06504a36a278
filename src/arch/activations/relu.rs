/// Rectified linear unit: `max(0, z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Relu;

impl Relu {
    pub fn f(&self, z: f64) -> f64 {
        z.max(0.)
    }
}
