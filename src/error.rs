//! Errors raised while loading or decoding conversion options.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}
