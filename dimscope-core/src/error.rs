// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DimError {
    /// A caller-supplied argument violates the operation's preconditions.
    InvalidInput(String),
    /// The eigen-solver failed on an otherwise valid input.
    Decomposition(String),
}

impl DimError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DimError::InvalidInput(msg.into())
    }
}

impl std::fmt::Display for DimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            DimError::Decomposition(e) => write!(f, "Decomposition error: {}", e),
        }
    }
}

impl std::error::Error for DimError {}

pub type DimResult<T> = Result<T, DimError>;
