use crate::error::LookupError;
use crate::lookup::LookupResult;
use crate::models::{Definition, null_as_default};
use serde::Deserialize;

/// Trims and lowercases a search term. `None` when nothing is left.
pub fn normalize_term(term: &str) -> Option<String> {
    let cleaned = term.trim().to_lowercase();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupRaw {
    #[serde(default)]
    found: Option<bool>,
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    is_spanish: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    definitions: Vec<Definition>,
    #[serde(default)]
    etymology: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_spanish_code(language: &str) -> bool {
    matches!(
        language.to_lowercase().as_str(),
        "es" | "spa" | "spanish" | "español" | "espanol"
    )
}

/// Parses the definition document returned by the service for `term`.
pub fn parse_lookup_response(
    term: &str,
    response: &str,
    source: &str,
) -> Result<LookupResult, LookupError> {
    let cleaned = clean_json_response(response);
    let raw: LookupRaw = serde_json::from_str(&cleaned).map_err(|e| {
        LookupError::MalformedResponse(format!(
            "Failed to parse lookup response: {}\nRaw: {}",
            e, response
        ))
    })?;

    let definitions: Vec<Definition> = raw
        .definitions
        .into_iter()
        .filter(|d| !d.definition.trim().is_empty())
        .collect();

    if !raw.found.unwrap_or(true) || definitions.is_empty() {
        return Err(LookupError::NotFound(term.to_string()));
    }

    let language = non_blank(raw.language).unwrap_or_else(|| "unknown".to_string());
    let is_spanish = raw.is_spanish.unwrap_or_else(|| is_spanish_code(&language));

    Ok(LookupResult {
        word: non_blank(raw.word).unwrap_or_else(|| term.to_string()),
        language,
        is_spanish,
        definitions,
        etymology: non_blank(raw.etymology),
        source: source.to_string(),
    })
}
