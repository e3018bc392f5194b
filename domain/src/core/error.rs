//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("max_iterations must be at least 1")]
    InvalidMaxIterations,

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Council already terminated; the state is sealed")]
    CouncilTerminated,

    #[error(
        "Cannot terminate at iteration {iteration} of {max_iterations} without a TERMINATE decision"
    )]
    PrematureTermination { iteration: u32, max_iterations: u32 },
}

impl DomainError {
    /// Check if this error was caused by mutating a sealed council
    pub fn is_sealed(&self) -> bool {
        matches!(self, DomainError::CouncilTerminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sealed_error_display() {
        let error = DomainError::CouncilTerminated;
        assert_eq!(
            error.to_string(),
            "Council already terminated; the state is sealed"
        );
    }

    #[test]
    fn test_is_sealed_check() {
        assert!(DomainError::CouncilTerminated.is_sealed());
        assert!(!DomainError::InvalidMaxIterations.is_sealed());
        assert!(!DomainError::InvalidPosition("negative".to_string()).is_sealed());
    }

    #[test]
    fn test_premature_termination_display() {
        let error = DomainError::PrematureTermination {
            iteration: 2,
            max_iterations: 5,
        };
        assert!(error.to_string().contains("iteration 2 of 5"));
    }
}
