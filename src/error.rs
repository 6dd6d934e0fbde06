use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bounding box `{0}`: expected four comma-separated numbers x,y,w,h with w,h >= 0")]
    InvalidBBox(String),

    #[error("detector unavailable: {0}")]
    DetectorFailed(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
