//! Process-wide, read-only access to the loaded classifier.
//!
//! Assets are installed exactly once and never replaced or dropped. Until then every call fails
//! fast with `SentinelErr::Unavailable`; readers never take a lock, including while a load is
//! still in progress on another thread.

use std::sync::OnceLock;

use log::{info, warn};
use rayon::prelude::*;

use crate::{
    classifier::{Classifier, ScoreResult},
    config::ArtifactConfig,
    Result, SentinelErr,
};

static GLOBAL: Sentinel = Sentinel::new();

/// A write-once slot for a [`Classifier`].
#[derive(Debug, Default)]
pub struct Sentinel {
    classifier: OnceLock<Classifier>,
}

impl Sentinel {
    pub const fn new() -> Self {
        Self {
            classifier: OnceLock::new(),
        }
    }

    /// Loads the artifacts named by `config` and installs the resulting classifier.
    ///
    /// Blocks the calling thread for the duration of the load. Nothing is installed if any
    /// artifact fails to load.
    ///
    /// # Errors
    /// `SentinelErr::Config` if an artifact is missing or malformed, or if assets were already
    /// installed.
    pub fn load(&self, config: &ArtifactConfig) -> Result<()> {
        let classifier = Classifier::load(config)?;
        self.install(classifier)
    }

    /// Installs an already built classifier.
    ///
    /// # Errors
    /// `SentinelErr::Config` if assets were already installed.
    pub fn install(&self, classifier: Classifier) -> Result<()> {
        if self.classifier.set(classifier).is_err() {
            warn!("rejected a second asset load, assets are already installed");
            return Err(SentinelErr::config("model assets are already loaded"));
        }

        info!(
            params = self.classifier.get().map_or(0, |c| c.network().size());
            "model assets ready"
        );
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.get().is_some()
    }

    /// Returns the installed classifier.
    ///
    /// # Errors
    /// `SentinelErr::Unavailable` if no assets were installed yet.
    pub fn classifier(&self) -> Result<&Classifier> {
        self.classifier.get().ok_or(SentinelErr::Unavailable)
    }

    /// Classifies `url` with the installed classifier.
    ///
    /// Availability is checked before any feature is extracted.
    ///
    /// # Errors
    /// `SentinelErr::Unavailable` if no assets were installed yet.
    pub fn classify(&self, url: &str) -> Result<ScoreResult> {
        self.classifier()?.classify(url)
    }

    /// Classifies many URLs in parallel.
    ///
    /// # Returns
    /// One result per URL, in input order.
    ///
    /// # Errors
    /// `SentinelErr::Unavailable` if no assets were installed yet, checked once before any
    /// work starts.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, urls: &[S]) -> Result<Vec<ScoreResult>> {
        let classifier = self.classifier()?;

        urls.par_iter()
            .map(|url| classifier.classify(url.as_ref()))
            .collect()
    }
}

/// The process-wide handle.
pub fn global() -> &'static Sentinel {
    &GLOBAL
}

/// Loads the artifacts into the process-wide handle. Meant to run once at startup.
///
/// # Errors
/// See [`Sentinel::load`].
pub fn load_assets(config: &ArtifactConfig) -> Result<()> {
    GLOBAL.load(config)
}

/// Classifies `url` with the process-wide handle.
///
/// # Errors
/// `SentinelErr::Unavailable` if [`load_assets`] has not succeeded yet.
pub fn classify(url: &str) -> Result<ScoreResult> {
    GLOBAL.classify(url)
}
