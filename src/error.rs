// SPDX-License-Identifier: MIT

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tinct_theme::ThemeError;

/// Everything the pipeline facade can fail with.
///
/// Analysis itself never fails; errors come from loading configuration and
/// from caller-supplied theme material.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

pub type Result<T> = std::result::Result<T, Error>;
