#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "capture")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("frame size mismatch: expected {expected:?}, got {actual:?}")]
    FrameSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("invalid size `{0}`, expected WIDTHxHEIGHT")]
    InvalidSize(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
