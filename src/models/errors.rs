use std::fmt;

/// Navigation-specific error types
#[derive(Debug)]
pub enum NavError {
    /// Failed to parse user input or stored data
    ParseError(String),
    /// Invalid input provided by user
    InvalidInput(String),
    /// No destination has been selected for travel
    NoDestinationSelected,
    /// A travel is already preparing or in transit
    TravelInProgress,
    /// Unknown system identifier
    UnknownSystem(String),
    /// Unknown planet within a system
    UnknownBody { system: String, body: String },
    /// Unknown custom waypoint identifier
    UnknownWaypoint(String),
    /// The catalog could not be loaded or parsed
    CatalogLoad(String),
    /// I/O error occurred
    IoError(std::io::Error),
}

/// Type alias for Results using NavError
pub type NavResult<T> = Result<T, NavError>;

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NavError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            NavError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            NavError::NoDestinationSelected => {
                write!(f, "Select or create a destination first")
            }
            NavError::TravelInProgress => {
                write!(f, "A travel is already in progress")
            }
            NavError::UnknownSystem(id) => write!(f, "Unknown system: {}", id),
            NavError::UnknownBody { system, body } => {
                write!(f, "No body {} in system {}", body, system)
            }
            NavError::UnknownWaypoint(id) => write!(f, "Unknown waypoint: {}", id),
            NavError::CatalogLoad(msg) => write!(f, "Failed to load catalog: {}", msg),
            NavError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NavError {
    fn from(err: std::io::Error) -> Self {
        NavError::IoError(err)
    }
}
