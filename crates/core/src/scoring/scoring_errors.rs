use thiserror::Error;

/// Errors raised while configuring or running the score calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Weights must add up to 1.0 within the configured tolerance.
    #[error(
        "Weights must sum to 1.0, got {sum:.4} (environmental={environmental}, social={social}, governance={governance})"
    )]
    InvalidWeights {
        environmental: f64,
        social: f64,
        governance: f64,
        sum: f64,
    },
}
