use drivebase::platform::PlatformError;
use drivebase_core::parameters::ParameterError;

/// Errors that can occur while driving the simulated robot.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}
