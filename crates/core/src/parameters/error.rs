//! Dashboard store errors

/// Why a dashboard read or write was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// `set` on a name that was never registered, or a name longer than
    /// `PARAM_NAME_LEN`
    InvalidConfig,
    /// `register` or `publish` with all `MAX_PARAMS` slots taken
    StoreFull,
    /// `set` on a diagnostic created by `publish`
    ReadOnly,
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::InvalidConfig => write!(f, "unknown dashboard value"),
            ParameterError::StoreFull => write!(f, "dashboard full"),
            ParameterError::ReadOnly => write!(f, "dashboard value is published read-only"),
        }
    }
}

impl core::error::Error for ParameterError {}
