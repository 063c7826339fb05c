//! Word list management over the persisted document.
//!
//! Every mutation loads the whole store, changes it in memory and writes it
//! back. Two overlapping mutations can therefore lose one of the writes;
//! callers drive this from a single interactive user and accept that.

use crate::error::{ListError, StorageError};
use crate::logger;
use crate::models::{DEFAULT_LIST_ID, DEFAULT_LIST_NAME, NewWord, Store, WordEntry, WordList};
use crate::storage::DocumentStore;
use chrono::Utc;
use uuid::Uuid;

/// Result of saving a looked-up word from the search flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Names of every list that received a copy, default list first.
    Saved { lists: Vec<String> },
    /// The default list already had the word.
    AlreadySaved,
    Failed(String),
}

#[derive(Debug)]
pub struct ListManager<D> {
    store: D,
}

impl<D: DocumentStore> ListManager<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    /// Current lists, or an empty vector when nothing is stored or the
    /// store cannot be read.
    pub async fn get_all_lists(&self) -> Vec<WordList> {
        match self.store.load().await {
            Ok(store) => store.lists,
            Err(e) => {
                logger::log(&format!("Failed to read word lists: {}", e));
                Vec::new()
            }
        }
    }

    pub async fn get_list_by_id(&self, id: &str) -> Option<WordList> {
        self.get_all_lists().await.into_iter().find(|l| l.id == id)
    }

    /// Creates the default list if missing and restores its canonical name.
    /// Safe to call any number of times.
    pub async fn ensure_default_list(&self) {
        if let Err(e) = self.try_ensure_default_list().await {
            logger::log(&format!("Failed to initialize default list: {}", e));
        }
    }

    async fn try_ensure_default_list(&self) -> Result<(), StorageError> {
        let mut store = self.store.load().await?;

        match store.find_mut(DEFAULT_LIST_ID) {
            Some(list) if list.name == DEFAULT_LIST_NAME => return Ok(()),
            Some(list) => {
                logger::log(&format!(
                    "Renaming default list from \"{}\" to \"{}\"",
                    list.name, DEFAULT_LIST_NAME
                ));
                list.name = DEFAULT_LIST_NAME.to_string();
            }
            None => {
                store.lists.push(WordList::new(
                    DEFAULT_LIST_ID,
                    DEFAULT_LIST_NAME,
                    Utc::now(),
                ));
            }
        }

        self.store.save(&store).await
    }

    pub async fn get_default_list(&self) -> Option<WordList> {
        self.ensure_default_list().await;
        self.get_list_by_id(DEFAULT_LIST_ID).await
    }

    pub async fn create_list(&self, name: &str) -> Result<WordList, ListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::Validation);
        }

        let mut store = self.store.load().await?;
        if store.has_name(name) {
            return Err(ListError::DuplicateName(name.to_string()));
        }

        let list = WordList::new(Uuid::new_v4().to_string(), name, Utc::now());
        store.lists.push(list.clone());
        self.store.save(&store).await?;

        logger::log(&format!("Created list \"{}\" ({})", list.name, list.id));
        Ok(list)
    }

    /// Removes a list. Deleting an unknown id succeeds without changes.
    pub async fn delete_list(&self, id: &str) -> Result<(), ListError> {
        if id == DEFAULT_LIST_ID {
            return Err(ListError::ProtectedList(id.to_string()));
        }

        let mut store = self.store.load().await?;
        store.lists.retain(|l| l.id != id);
        self.store.save(&store).await?;

        logger::log(&format!("Deleted list {}", id));
        Ok(())
    }

    pub async fn add_word_to_list(
        &self,
        list_id: &str,
        word: NewWord,
    ) -> Result<WordEntry, ListError> {
        let mut store = self.store.load().await?;
        let entry = insert_word(&mut store, list_id, word)?;
        self.store.save(&store).await?;
        Ok(entry)
    }

    /// Removes an entry by id. An unknown word id leaves the list unchanged.
    pub async fn remove_word_from_list(&self, list_id: &str, word_id: &str) -> Result<(), ListError> {
        let mut store = self.store.load().await?;
        let list = store
            .find_mut(list_id)
            .ok_or_else(|| ListError::ListNotFound(list_id.to_string()))?;

        list.words.retain(|w| w.id != word_id);
        self.store.save(&store).await?;
        Ok(())
    }

    /// Saves a word to the default list and, if different, to the selected
    /// list. Each list gets its own entry.
    pub async fn save_word(&self, selected_list_id: &str, word: NewWord) -> SaveOutcome {
        let default_result = self.add_word_to_list(DEFAULT_LIST_ID, word.clone()).await;

        let selected_result = if selected_list_id == DEFAULT_LIST_ID {
            None
        } else {
            Some(self.add_word_to_list(selected_list_id, word).await)
        };

        match (default_result, selected_result) {
            (Ok(_), None) => SaveOutcome::Saved {
                lists: vec![DEFAULT_LIST_NAME.to_string()],
            },
            (Ok(_), Some(Ok(_))) => {
                let mut lists = vec![DEFAULT_LIST_NAME.to_string()];
                if let Some(selected) = self.get_list_by_id(selected_list_id).await {
                    lists.push(selected.name);
                }
                SaveOutcome::Saved { lists }
            }
            (Err(ListError::DuplicateWord { .. }), _) => SaveOutcome::AlreadySaved,
            (Err(e), _) | (Ok(_), Some(Err(e))) => {
                logger::log(&format!("Failed to save word: {}", e));
                SaveOutcome::Failed(e.to_string())
            }
        }
    }

    /// Wipes every list and word, then recreates the empty default list.
    pub async fn delete_all_user_data(&self) -> Result<(), ListError> {
        self.store.clear().await?;
        logger::log("Deleted all user data");
        self.try_ensure_default_list().await?;
        Ok(())
    }
}

/// The list the saved-words screen shows: `selected` when it still exists,
/// otherwise the default list, otherwise the first one. Word count does not
/// matter here, unlike quiz eligibility.
pub fn review_list<'a>(lists: &'a [WordList], selected: Option<&str>) -> Option<&'a WordList> {
    selected
        .and_then(|id| lists.iter().find(|l| l.id == id))
        .or_else(|| lists.iter().find(|l| l.is_default()))
        .or_else(|| lists.first())
}

fn insert_word(store: &mut Store, list_id: &str, word: NewWord) -> Result<WordEntry, ListError> {
    let list = store
        .find_mut(list_id)
        .ok_or_else(|| ListError::ListNotFound(list_id.to_string()))?;

    if list.contains_word(&word.word) {
        return Err(ListError::DuplicateWord {
            word: word.word,
            list_id: list_id.to_string(),
        });
    }

    let entry = WordEntry::from_new_word(Uuid::new_v4().to_string(), word, Utc::now());
    list.words.push(entry.clone());
    Ok(entry)
}
