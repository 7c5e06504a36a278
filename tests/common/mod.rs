#![allow(dead_code)]

use std::path::PathBuf;

use ndarray::{Array1, Array2};
use phishing_sentinel::{
    arch::{LinearParams, NetworkWeights, LAYER_DIMS},
    ArtifactConfig,
};

/// The directory holding the pinned weight and scaler artifacts.
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

pub fn fixture_config() -> ArtifactConfig {
    ArtifactConfig::new(fixture_dir())
}

/// The same parameters stored in `tests/fixtures/sentinel_v1.safetensors`. Every value is a
/// multiple of 1/32, so the F32 file holds them exactly.
pub fn fixture_weights() -> NetworkWeights {
    let layers = LAYER_DIMS
        .iter()
        .enumerate()
        .map(|(l, &(inputs, outputs))| {
            let weight = Array2::from_shape_fn((outputs, inputs), |(i, j)| {
                (((i * 31 + j * 17 + l * 7) % 23) as f64 - 11.) / 16.
            });
            let bias = Array1::from_shape_fn(outputs, |i| {
                (((i * 13 + l * 5) % 9) as f64 - 4.) / 32.
            });
            LinearParams::new(weight, bias)
        })
        .collect();

    NetworkWeights::new(layers).unwrap()
}

pub fn assert_close(got: f64, expected: f64, rel: f64) {
    let tol = rel * expected.abs().max(1.);
    assert!(
        (got - expected).abs() <= tol,
        "got {got}, expected {expected} (tolerance {tol})"
    );
}
