//! Loading and exporting the trained parameter blobs.
//!
//! Weights are a safetensors file holding the state dict of the trained sequential module,
//! normalization statistics a JSON document. Any problem found while loading is reported as
//! `SentinelErr::Config`: a process must never serve with partially loaded assets.

use std::{collections::HashMap, fs, path::Path};

use log::info;
use ndarray::{Array1, Array2};
use safetensors::{serialize_to_file, tensor::TensorView, Dtype, SafeTensors};

use crate::{
    arch::{LinearParams, NetworkWeights, LAYER_DIMS},
    normalize::NormalizationParams,
    Result, SentinelErr,
};

/// State dict prefix of each affine transform. Indices skip the activation and dropout
/// modules of the trained sequential stack.
pub const TENSOR_PREFIXES: [&str; 4] = ["network.0", "network.3", "network.5", "network.7"];

/// Loads the network weights from a safetensors file.
///
/// # Args
/// * `path` - The weights artifact.
///
/// # Errors
/// `SentinelErr::Config` if the file is unreadable, is not safetensors, misses a tensor or has
/// any tensor with the wrong dtype or shape or holding a NaN or infinite value.
pub fn load_weights(path: &Path) -> Result<NetworkWeights> {
    let bytes = fs::read(path)
        .map_err(|e| SentinelErr::config(format!("cannot read '{}': {e}", path.display())))?;

    let weights = weights_from_bytes(&bytes).map_err(|e| match e {
        SentinelErr::Config(msg) => SentinelErr::config(format!("'{}': {msg}", path.display())),
        other => other,
    })?;

    info!(params = weights.num_params(); "loaded network weights from {}", path.display());
    Ok(weights)
}

/// Decodes network weights from an in-memory safetensors buffer.
///
/// `F32` and `F64` tensors are accepted and widened to `f64`.
///
/// # Errors
/// `SentinelErr::Config` on any format or shape problem.
pub fn weights_from_bytes(bytes: &[u8]) -> Result<NetworkWeights> {
    let tensors = SafeTensors::deserialize(bytes)
        .map_err(|e| SentinelErr::config(format!("invalid safetensors data: {e}")))?;

    let layers = TENSOR_PREFIXES
        .iter()
        .zip(LAYER_DIMS)
        .map(|(prefix, (inputs, outputs))| {
            let name = format!("{prefix}.weight");
            let weight = read_tensor(&tensors, &name, &[outputs, inputs])?;
            let weight = Array2::from_shape_vec((outputs, inputs), weight)
                .map_err(|e| SentinelErr::config(format!("tensor {name}: {e}")))?;

            let bias = read_tensor(&tensors, &format!("{prefix}.bias"), &[outputs])?;

            Ok(LinearParams::new(weight, Array1::from(bias)))
        })
        .collect::<Result<Vec<_>>>()?;

    // Shapes were checked per tensor, so this only trips on a topology change.
    NetworkWeights::new(layers).map_err(|e| SentinelErr::config(e.to_string()))
}

fn read_tensor(tensors: &SafeTensors<'_>, name: &str, shape: &[usize]) -> Result<Vec<f64>> {
    let view = tensors
        .tensor(name)
        .map_err(|e| SentinelErr::config(format!("missing tensor {name}: {e}")))?;

    if view.shape() != shape {
        return Err(SentinelErr::config(format!(
            "tensor {name} has shape {:?}, expected {shape:?}",
            view.shape()
        )));
    }

    // Both safetensors and every supported target are little-endian.
    let data = view.data();
    let values: Vec<f64> = match view.dtype() {
        Dtype::F32 => data
            .chunks_exact(4)
            .map(|b| f64::from(bytemuck::pod_read_unaligned::<f32>(b)))
            .collect(),
        Dtype::F64 => data
            .chunks_exact(8)
            .map(bytemuck::pod_read_unaligned::<f64>)
            .collect(),
        other => {
            return Err(SentinelErr::config(format!(
                "tensor {name} has dtype {other:?}, expected F32 or F64"
            )))
        }
    };

    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(SentinelErr::config(format!(
            "tensor {name} holds a non-finite value at index {i}"
        )));
    }

    Ok(values)
}

/// Writes the network weights as an `F32` safetensors file, named the way [`load_weights`]
/// expects them.
///
/// # Errors
/// `SentinelErr::Config` if the file cannot be written.
pub fn save_weights(weights: &NetworkWeights, path: &Path) -> Result<()> {
    let mut buffers = Vec::with_capacity(2 * TENSOR_PREFIXES.len());

    for (prefix, layer) in TENSOR_PREFIXES.iter().zip(weights.layers()) {
        let weight: Vec<f32> = layer.weight.iter().map(|&w| w as f32).collect();
        let bias: Vec<f32> = layer.bias.iter().map(|&b| b as f32).collect();

        let (rows, cols) = layer.weight.dim();
        buffers.push((format!("{prefix}.weight"), vec![rows, cols], weight));
        buffers.push((format!("{prefix}.bias"), vec![layer.bias.len()], bias));
    }

    let views = buffers
        .iter()
        .map(|(name, shape, values)| {
            TensorView::new(Dtype::F32, shape.clone(), bytemuck::cast_slice(values))
                .map(|view| (name.as_str(), view))
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| SentinelErr::config(format!("cannot encode weights: {e}")))?;

    let metadata = HashMap::from([("format".to_string(), "pt".to_string())]);
    serialize_to_file(views, &Some(metadata), path)
        .map_err(|e| SentinelErr::config(format!("cannot write '{}': {e}", path.display())))?;

    info!(params = weights.num_params(); "saved network weights to {}", path.display());
    Ok(())
}

/// Loads the normalization statistics from a JSON file of the form
/// `{ "mean": [...], "scale": [...] }`.
///
/// # Errors
/// `SentinelErr::Config` if the file is unreadable, malformed, has the wrong arity, a
/// non-finite mean or a scale that is not strictly positive and finite.
pub fn load_scaler(path: &Path) -> Result<NormalizationParams> {
    let content = fs::read_to_string(path)
        .map_err(|e| SentinelErr::config(format!("cannot read '{}': {e}", path.display())))?;

    let params: NormalizationParams = serde_json::from_str(&content)
        .map_err(|e| SentinelErr::config(format!("'{}': {e}", path.display())))?;

    info!("loaded normalization statistics from {}", path.display());
    Ok(params)
}

/// Writes the normalization statistics in the format [`load_scaler`] reads.
///
/// # Errors
/// `SentinelErr::Config` if the file cannot be written.
pub fn save_scaler(params: &NormalizationParams, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(params)
        .map_err(|e| SentinelErr::config(format!("cannot encode scaler: {e}")))?;

    fs::write(path, json)
        .map_err(|e| SentinelErr::config(format!("cannot write '{}': {e}", path.display())))
}
