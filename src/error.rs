//! Error types for marga

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// marga error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A run-time parameter is outside its sane physical range.
    ///
    /// Raised during setup; the simulation loop never starts.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Random obstacle placement gave up after its retry budget
    #[error("Obstacle placement failed: obstacle {index} not placed after {attempts} attempts")]
    ObstaclePlacement {
        /// Index of the obstacle that could not be placed
        index: usize,
        /// Number of attempts made
        attempts: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidConfiguration`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
