//! Error handling for the dashboard.

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Main error type for the dashboard.
#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    /// The incident table could not be read, parsed or validated.
    /// The message carries the whole context chain, so `cause` is not
    /// exposed again through `Error::source`.
    #[error("failed to load dataset from {origin}: {cause:#}")]
    DataLoad { origin: String, cause: anyhow::Error },

    /// An attack type outside the table's domain was selected.
    #[error("attack type '{selection}' is not present in the dataset (available: {})", .available.join(", "))]
    InvalidSelection {
        selection: String,
        available: Vec<String>,
    },

    /// Malformed environment variable or command-line argument.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl DashboardError {
    /// Wrap a loader failure with the file (or stream) it came from.
    pub fn data_load(origin: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::DataLoad {
            origin: origin.into(),
            cause,
        }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
