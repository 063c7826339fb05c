use crate::error::ShareError;
use crate::models::WordEntry;

pub const SHARE_FOOTER: &str = "Shared from Glosario";

/// Platform share mechanism (share sheet, clipboard, ...).
pub trait ShareSink {
    fn share(&self, title: &str, message: &str) -> Result<(), ShareError>;
}

pub fn share_title(entry: &WordEntry) -> String {
    format!("Definition of {}", entry.word)
}

/// Renders an entry as chat-style text: bold word, italic etymology, then
/// numbered definitions.
pub fn format_entry(entry: &WordEntry) -> String {
    let mut message = format!("📖 *{}*\n", entry.word);
    if let Some(etymology) = &entry.etymology {
        message.push_str(&format!("_{}_\n", etymology));
    }
    message.push('\n');

    for (index, def) in entry.definitions.iter().enumerate() {
        message.push_str(&format!("*{}.* {}", index + 1, def.definition));
        if let Some(category) = &def.category {
            message.push_str(&format!(" _({})_", category));
        }
        message.push('\n');
        if !def.synonyms.is_empty() {
            let synonyms: Vec<&str> = def.synonyms.iter().map(String::as_str).collect();
            message.push_str(&format!("*Synonyms:* {}\n", synonyms.join(", ")));
        }
        if !def.antonyms.is_empty() {
            let antonyms: Vec<&str> = def.antonyms.iter().map(String::as_str).collect();
            message.push_str(&format!("*Antonyms:* {}\n", antonyms.join(", ")));
        }
        message.push('\n');
    }

    message.push_str("---\n");
    message.push_str(SHARE_FOOTER);
    message
}

pub fn share_entry<S: ShareSink + ?Sized>(sink: &S, entry: &WordEntry) -> Result<(), ShareError> {
    sink.share(&share_title(entry), &format_entry(entry))
}
