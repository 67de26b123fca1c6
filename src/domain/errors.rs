#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    MissingConfig(String),
    Delivery(String),
    Storage(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::MissingConfig(what) => {
                write!(f, "Missing configuration: {}", what)
            }
            RegistryError::Delivery(msg) => {
                write!(f, "Delivery failed: {}", msg)
            }
            RegistryError::Storage(msg) => {
                write!(f, "Storage error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

pub type RegistryResult<T> = Result<T, RegistryError>;
