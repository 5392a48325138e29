//! Errors raised by a [`ModelStore`](super::ModelStore) itself.
//!
//! A rejected operation is a controller error; these only describe models the
//! store cannot hold.

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The model cannot be stored in its current form.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },
}

impl StorageError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
