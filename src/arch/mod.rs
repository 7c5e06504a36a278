pub mod activations;
pub mod layers;
mod network;
mod weights;

pub use network::ScoringNetwork;
pub use weights::{LinearParams, NetworkWeights, LAYER_DIMS};
