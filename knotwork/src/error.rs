use thiserror::Error;

/// Errors for input that is validated rather than ignored.
///
/// Scene edits never produce these; a stale id is a silent no-op.
#[derive(Debug, Error)]
pub enum KnotError {
    #[error("invalid options JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },
    #[error("parameter '{param}' out of range [{min}, {max}]: got {got}")]
    OutOfRange { param: &'static str, min: f32, max: f32, got: f32 },
}

impl KnotError {
    /// Stable machine-readable code, shared with the JS bridge.
    pub fn code(&self) -> &'static str {
        match self {
            KnotError::InvalidJson(_) => "invalid_json",
            KnotError::NonFinite { .. } => "non_finite",
            KnotError::OutOfRange { .. } => "out_of_range",
        }
    }

    /// Name of the offending parameter, if there is one.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            KnotError::InvalidJson(_) => None,
            KnotError::NonFinite { param } | KnotError::OutOfRange { param, .. } => Some(param),
        }
    }
}
