use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, SentinelErr};

const DEFAULT_MODEL_DIR: &str = "models";
const DEFAULT_WEIGHTS_FILE: &str = "sentinel_v1.safetensors";
const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Where the trained artifacts live.
///
/// Every field is optional when deserialized; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub model_dir: PathBuf,
    pub weights_file: String,
    pub scaler_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            weights_file: DEFAULT_WEIGHTS_FILE.to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
        }
    }
}

impl ArtifactConfig {
    /// Creates a configuration with the default file names inside `model_dir`.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Loads an `ArtifactConfig` from a JSON file.
    ///
    /// # Errors
    /// `SentinelErr::Config` if the file cannot be read or parsed.
    pub fn from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SentinelErr::config(format!("cannot read '{}': {e}", path.display()))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| SentinelErr::config(format!("invalid config '{}': {e}", path.display())))
    }

    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(&self.weights_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.model_dir.join(&self.scaler_file)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_point_at_models_dir() {
        let cfg = ArtifactConfig::default();
        assert_eq!(cfg.weights_path(), Path::new("models/sentinel_v1.safetensors"));
        assert_eq!(cfg.scaler_path(), Path::new("models/scaler.json"));
    }

    #[test]
    fn new_keeps_default_file_names() {
        let cfg = ArtifactConfig::new("/opt/sentinel");
        assert_eq!(cfg.scaler_path(), Path::new("/opt/sentinel/scaler.json"));
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "model_dir": "/srv/assets", "weights_file": "v2.safetensors" }}"#)
            .unwrap();

        let cfg = ArtifactConfig::from_json(file.path()).unwrap();
        assert_eq!(cfg.weights_path(), Path::new("/srv/assets/v2.safetensors"));
        assert_eq!(cfg.scaler_file, "scaler.json");
    }

    #[test]
    fn from_json_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "model_dir = 3").unwrap();

        let err = ArtifactConfig::from_json(file.path()).unwrap_err();
        assert!(matches!(err, SentinelErr::Config(_)));
    }
}
