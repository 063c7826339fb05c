use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_LIST_ID: &str = "default";
pub const DEFAULT_LIST_NAME: &str = "General";

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One sense of a word as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub synonyms: BTreeSet<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub antonyms: BTreeSet<String>,
}

impl Definition {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            category: None,
            usage: None,
            synonyms: BTreeSet::new(),
            antonyms: BTreeSet::new(),
        }
    }
}

/// Word data handed to the list manager before it gets an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub etymology: Option<String>,
}

impl NewWord {
    pub fn new(word: impl Into<String>, definitions: Vec<Definition>) -> Self {
        Self {
            word: word.into(),
            definitions,
            etymology: None,
        }
    }

    pub fn with_etymology(mut self, etymology: impl Into<String>) -> Self {
        self.etymology = Some(etymology.into());
        self
    }
}

/// A saved word. Each list holds its own copy with its own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub etymology: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl WordEntry {
    pub fn from_new_word(id: String, word: NewWord, added_at: DateTime<Utc>) -> Self {
        Self {
            id,
            word: word.word,
            definitions: word.definitions,
            etymology: word.etymology,
            added_at,
        }
    }

    /// Only the first sense is ever used by the quiz.
    pub fn first_definition(&self) -> Option<&str> {
        self.definitions.first().map(|d| d.definition.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub words: Vec<WordEntry>,
    pub created_at: DateTime<Utc>,
}

impl WordList {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            words: Vec::new(),
            created_at,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_LIST_ID
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.word == word)
    }

    /// Entries ordered for review, most recently added first.
    pub fn words_newest_first(&self) -> Vec<&WordEntry> {
        let mut words: Vec<&WordEntry> = self.words.iter().collect();
        words.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        words
    }
}

/// The whole persisted document: every list, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    pub lists: Vec<WordList>,
}

impl Store {
    pub fn find(&self, id: &str) -> Option<&WordList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut WordList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    pub fn has_name(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.lists.iter().any(|l| l.name.to_lowercase() == wanted)
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub word: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub etymology: Option<String>,
}
