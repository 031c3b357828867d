//! Startup errors
//!
//! The simulation itself cannot fail; only loading configuration and asset
//! tables can, and those failures are fatal before the first tick.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },

    #[error("invalid asset `{asset}`: {reason}")]
    InvalidAsset { asset: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
