//! Word lookup against an external definition service.

pub mod client;
pub mod parser;

use crate::error::LookupError;
use crate::logger;
use crate::models::{Definition, NewWord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::{DEFAULT_MODEL, ModelConfig, OpenRouterLookup};
pub use parser::{normalize_term, parse_lookup_response};

/// A successful lookup, ready to be shown or saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub word: String,
    pub language: String,
    pub is_spanish: bool,
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub etymology: Option<String>,
    pub source: String,
}

impl LookupResult {
    pub fn to_new_word(&self) -> NewWord {
        NewWord {
            word: self.word.clone(),
            definitions: self.definitions.clone(),
            etymology: self.etymology.clone(),
        }
    }
}

impl From<LookupResult> for NewWord {
    fn from(result: LookupResult) -> Self {
        NewWord {
            word: result.word,
            definitions: result.definitions,
            etymology: result.etymology,
        }
    }
}

#[async_trait]
pub trait WordLookup: Send + Sync {
    /// `term` is already trimmed and lowercased.
    async fn lookup(&self, term: &str) -> Result<LookupResult, LookupError>;
}

/// Normalizes `term` and asks `lookup` for its definitions.
pub async fn search_word<L: WordLookup + ?Sized>(
    lookup: &L,
    term: &str,
) -> Result<LookupResult, LookupError> {
    let term = normalize_term(term).ok_or(LookupError::EmptyTerm)?;

    logger::log(&format!("Looking up \"{}\"", term));
    let result = lookup.lookup(&term).await;
    match &result {
        Ok(found) => logger::log(&format!(
            "Lookup of \"{}\" returned {} definitions from {}",
            term,
            found.definitions.len(),
            found.source
        )),
        Err(e) => logger::log(&format!("Lookup of \"{}\" failed: {}", term, e)),
    }
    result
}
