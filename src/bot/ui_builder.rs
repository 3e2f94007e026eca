//! UI Builder module for formatting numbered menus and display names

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::dialogue::Language;

lazy_static! {
    /// English-to-Telugu pesticide name transliterations, used for display
    /// only. Stored selections and table lookups always use the canonical
    /// English names.
    static ref TELUGU_NAMES: HashMap<&'static str, &'static str> = {
        let mut names = HashMap::new();
        names.insert("Glyphosate", "గ్లైఫోసేట్");
        names.insert("Chlorpyrifos", "క్లోర్పైరిఫోస్");
        names.insert("Carbendazim", "కార్బెండాజిమ్");
        names.insert("Imidacloprid", "ఇమిడాక్లోప్రిడ్");
        names.insert("Mancozeb", "మ్యాంకోజెబ్");
        names.insert("Monocrotophos", "మోనోక్రోటోఫోస్");
        names
    };
}

/// Display name for a pesticide in the given language.
///
/// Names without a transliteration fall back to the canonical form.
pub fn display_name(name: &str, language: Language) -> &str {
    match language {
        Language::En => name,
        Language::Te => TELUGU_NAMES.get(name).copied().unwrap_or(name),
    }
}

/// Format entries as a numbered list, one per line ("1. Glyphosate").
pub fn format_numbered_list<S: AsRef<str>>(entries: &[S]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format pesticide names as a numbered list with localized display names.
pub fn format_item_list(items: &[String], language: Language) -> String {
    let display: Vec<&str> = items
        .iter()
        .map(|item| display_name(item, language))
        .collect();
    format_numbered_list(&display)
}
