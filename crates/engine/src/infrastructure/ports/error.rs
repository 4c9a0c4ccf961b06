//! Storage errors for the region document port.

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The database call itself failed.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored document body is not valid JSON for its shape, or a document
    /// could not be encoded.
    #[error("Document '{document}' could not be (de)serialized: {message}")]
    Serialization { document: String, message: String },
}

impl RepoError {
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(document: &str, message: impl ToString) -> Self {
        Self::Serialization {
            document: document.to_string(),
            message: message.to_string(),
        }
    }
}
