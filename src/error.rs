/// All error types for the proximity engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProximityError {
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),
    #[error("Geodetic inversion did not converge after {iterations} iterations (last step {last_step:e} rad)")]
    NonConvergent { iterations: u32, last_step: f64 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProximityError>;
