use std::{error::Error, fmt};

/// The result type used across the sentinel crate.
pub type Result<T> = std::result::Result<T, SentinelErr>;

/// The sentinel's error type.
///
/// There is no variant for malformed URLs: feature extraction is total over arbitrary input.
#[derive(Debug)]
pub enum SentinelErr {
    /// A normalization or weight artifact is unreadable, malformed or wrong-shaped. Fatal to
    /// startup.
    Config(String),

    /// A feature vector, weight matrix or intermediate activation has the wrong dimensionality.
    Shape {
        /// What was being checked (e.g. "input features", "network.3.weight rows").
        what: &'static str,
        /// Observed size.
        got: usize,
        /// Expected size.
        expected: usize,
    },

    /// Classification was requested before the assets were installed.
    Unavailable,
}

impl SentinelErr {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn check_shape(what: &'static str, got: usize, expected: usize) -> Result<()> {
        if got != expected {
            return Err(Self::Shape {
                what,
                got,
                expected,
            });
        }

        Ok(())
    }
}

impl fmt::Display for SentinelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentinelErr::Config(msg) => write!(f, "invalid model assets: {msg}"),
            SentinelErr::Shape {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            SentinelErr::Unavailable => write!(f, "model assets are not loaded"),
        }
    }
}

impl Error for SentinelErr {}
