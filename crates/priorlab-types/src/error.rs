// ─────────────────────────────────────────────────────────────────────
// PriorLab — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all PriorLab failures.
///
/// Pure numeric functions never produce these; only constructors and
/// configuration entry points that guard a domain boundary do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabError {
    /// Configuration failed validation or could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid caller input (bias, shape parameter, resolution).
    #[error("validation error: {0}")]
    Validation(String),

    /// Argument outside the mathematical domain of a distribution.
    #[error("domain error: {0}")]
    Domain(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type LabResult<T> = Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = LabError::Config("learning_rate must be > 0".into());
        assert_eq!(e.to_string(), "config error: learning_rate must be > 0");
        let e = LabError::Domain("alpha must be > 0, got -1".into());
        assert_eq!(e.to_string(), "domain error: alpha must be > 0, got -1");
    }
}
