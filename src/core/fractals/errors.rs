use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmConstructorError {
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
}
