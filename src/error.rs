use serde::Serialize;

/// Failures of the key-value backend or of the stored document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend failure: {0}")]
    Backend(String),
    #[error("Stored data could not be (de)serialized: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Error types for word list operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListError {
    /// List name was empty or whitespace
    #[error("List name cannot be empty")]
    Validation,
    /// A list with this name (ignoring case) already exists
    #[error("A list named \"{0}\" already exists")]
    DuplicateName(String),
    /// The word is already saved in the target list
    #[error("\"{word}\" is already in this list")]
    DuplicateWord { word: String, list_id: String },
    #[error("List {0} not found")]
    ListNotFound(String),
    /// The default list cannot be deleted
    #[error("List {0} is protected and cannot be deleted")]
    ProtectedList(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error types for the word lookup service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Search term is empty")]
    EmptyTerm,
    #[error("No definition found for \"{0}\"")]
    NotFound(String),
    #[error("Lookup service rejected the credentials: {0}")]
    Auth(String),
    #[error("Lookup service rate limit reached: {0}")]
    RateLimited(String),
    #[error("Could not reach the lookup service: {0}")]
    Network(String),
    #[error("Lookup service returned an unreadable response: {0}")]
    MalformedResponse(String),
}

impl LookupError {
    /// Message meant for the person using the app, without transport details.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::EmptyTerm => "Please type a word".to_string(),
            LookupError::NotFound(term) => format!("No definition found for \"{}\"", term),
            LookupError::Auth(_) => "The dictionary service is not configured correctly".to_string(),
            LookupError::RateLimited(_) => {
                "Too many searches right now, try again in a moment".to_string()
            }
            LookupError::Network(_) => {
                "Connection error. Check your internet connection and try again.".to_string()
            }
            LookupError::MalformedResponse(_) => {
                "The dictionary service returned an unexpected answer".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuizError {
    #[error("At least 2 words are needed to play, found {found}")]
    NotEnoughWords { found: usize },
    #[error("\"{0}\" has no definition to quiz on")]
    MissingDefinition(String),
    #[error("There is no unanswered question")]
    NoOpenQuestion,
    #[error("No list selected")]
    NoListSelected,
}

/// Failure reported by a platform share mechanism.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShareError {
    /// The user dismissed the share dialog.
    #[error("Sharing was cancelled")]
    Cancelled,
    #[error("Could not share: {0}")]
    Platform(String),
}

/// Success flag plus message, the shape the presentation layer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub success: bool,
    pub message: String,
}

impl OperationReport {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn from_result<T, E: std::fmt::Display>(
        result: &Result<T, E>,
        success_message: &str,
    ) -> Self {
        match result {
            Ok(_) => Self::ok(success_message),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

impl From<LookupError> for OperationReport {
    fn from(e: LookupError) -> Self {
        Self::failed(e.user_message())
    }
}
