use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KtxError {
    #[error("texture handle is null")]
    NullHandle,
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("level {level} out of range, texture has {num_levels} levels")]
    InvalidLevel { level: u32, num_levels: u32 },
    #[error("layer {layer} out of range, texture has {num_layers} layers")]
    InvalidLayer { layer: u32, num_layers: u32 },
    #[error("face {face_slice} out of range, texture has {num_faces} faces")]
    InvalidFace { face_slice: u32, num_faces: u32 },
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Status codes handed across the host boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    NullHandle = 1,
    InvalidLevel = 2,
    InvalidLayer = 3,
    InvalidFace = 4,
    UnsupportedFormat = 5,
    InvalidValue = 6,
}

impl From<&KtxError> for ErrorCode {
    fn from(err: &KtxError) -> Self {
        match err {
            KtxError::NullHandle => ErrorCode::NullHandle,
            KtxError::InvalidValue(_) => ErrorCode::InvalidValue,
            KtxError::InvalidLevel { .. } => ErrorCode::InvalidLevel,
            KtxError::InvalidLayer { .. } => ErrorCode::InvalidLayer,
            KtxError::InvalidFace { .. } => ErrorCode::InvalidFace,
            KtxError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
        }
    }
}

impl<T> From<&Result<T, KtxError>> for ErrorCode {
    fn from(result: &Result<T, KtxError>) -> Self {
        match result {
            Ok(_) => ErrorCode::Success,
            Err(err) => err.into(),
        }
    }
}
