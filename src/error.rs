use std::{io, path::PathBuf};

use image::ImageError;
use thiserror::Error;

use crate::icon::ConfigError;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("could not open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("unsupported image format in {}", path.display())]
    UnknownFormat { path: PathBuf },
    #[error("could not decode {}: {source}", path.display())]
    Decode { path: PathBuf, source: ImageError },
    #[error("could not encode image for {}: {source}", path.display())]
    Encode { path: PathBuf, source: ImageError },
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = IconError> = std::result::Result<T, E>;
