pub mod config;
pub mod error;
pub mod lists;
pub mod logger;
pub mod lookup;
pub mod models;
pub mod quiz;
pub mod share;
pub mod storage;


// Re-exports for convenience
pub use config::Config;
pub use error::{
    ListError, LookupError, OperationReport, QuizError, ShareError, StorageError,
};
pub use lists::{ListManager, SaveOutcome, review_list};
pub use lookup::{LookupResult, ModelConfig, OpenRouterLookup, WordLookup, search_word};
pub use models::{
    DEFAULT_LIST_ID, DEFAULT_LIST_NAME, Definition, NewWord, Question, Store, WordEntry, WordList,
};
pub use quiz::{
    AnswerOutcome, QuizSession, QuizState, generate_question, preferred_list, record_answer,
    select_eligible_lists,
};
pub use share::{ShareSink, format_entry, share_entry};
pub use storage::{DocumentStore, JsonDocumentStore, KeyValueStore, MemoryStore, SqliteStore};
