//! Conversation dialogue module: the typed step machine driving the
//! question/answer flow with farmers.

use serde::{Deserialize, Serialize};

/// Reserved input token that jumps an active conversation back to the
/// category menu.
pub const RESTART_KEYWORD: &str = "restart";

/// Languages the bot can answer in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Te,
}

impl Language {
    /// Language code used to key the localization tables.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Te => "te",
        }
    }

    /// Map the language menu reply ("1" or "2") to a language.
    pub fn from_menu_choice(input: &str) -> Option<Language> {
        match input.trim() {
            "1" => Some(Language::En),
            "2" => Some(Language::Te),
            _ => None,
        }
    }
}

/// Represents the conversation state for one sender.
///
/// Each variant carries exactly the data valid at that point in the
/// dialogue, so a step can never observe selections it has not reached yet.
/// Snapshots (`categories`, `items_a`, `items_b`) are taken from the
/// read-only dataset when the step is entered and stay stable afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Step {
    #[default]
    AwaitingLanguage,
    AwaitingCrop {
        language: Language,
    },
    AwaitingCategory {
        language: Language,
        crop: String,
        categories: Vec<String>,
    },
    AwaitingItemA {
        language: Language,
        crop: String,
        categories: Vec<String>,
        category: String,
        items_a: Vec<String>,
    },
    AwaitingItemB {
        language: Language,
        crop: String,
        categories: Vec<String>,
        category: String,
        item_a: String,
        items_b: Vec<String>,
    },
    AwaitingRestart {
        language: Language,
        crop: String,
        categories: Vec<String>,
    },
}

impl Step {
    /// Short step name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Step::AwaitingLanguage => "awaiting_language",
            Step::AwaitingCrop { .. } => "awaiting_crop",
            Step::AwaitingCategory { .. } => "awaiting_category",
            Step::AwaitingItemA { .. } => "awaiting_item_a",
            Step::AwaitingItemB { .. } => "awaiting_item_b",
            Step::AwaitingRestart { .. } => "awaiting_restart",
        }
    }

    /// Language chosen for this session, once past the language step.
    pub fn language(&self) -> Option<Language> {
        match self {
            Step::AwaitingLanguage => None,
            Step::AwaitingCrop { language }
            | Step::AwaitingCategory { language, .. }
            | Step::AwaitingItemA { language, .. }
            | Step::AwaitingItemB { language, .. }
            | Step::AwaitingRestart { language, .. } => Some(*language),
        }
    }

    /// Data carried back to the category menu on restart: language and crop
    /// are preserved, category/item selections are dropped. Only defined
    /// once the conversation has reached the category phase.
    pub fn restart_context(&self) -> Option<(Language, String, Vec<String>)> {
        match self {
            Step::AwaitingCategory {
                language,
                crop,
                categories,
            }
            | Step::AwaitingItemA {
                language,
                crop,
                categories,
                ..
            }
            | Step::AwaitingItemB {
                language,
                crop,
                categories,
                ..
            }
            | Step::AwaitingRestart {
                language,
                crop,
                categories,
            } => Some((*language, crop.clone(), categories.clone())),
            Step::AwaitingLanguage | Step::AwaitingCrop { .. } => None,
        }
    }
}

/// True when the message is the restart keyword (case-insensitive).
pub fn is_restart(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(RESTART_KEYWORD)
}

/// Parse a 1-based numbered-menu reply into a 0-based index.
///
/// Returns `None` for non-numeric input or an index outside `[1, len]`.
pub fn parse_menu_choice(input: &str, len: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    if (1..=len).contains(&choice) {
        Some(choice - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parsing() {
        // Valid choices
        assert_eq!(parse_menu_choice("1", 3), Some(0));
        assert_eq!(parse_menu_choice(" 3 ", 3), Some(2));

        // Invalid choices
        assert_eq!(parse_menu_choice("0", 3), None);
        assert_eq!(parse_menu_choice("4", 3), None);
        assert_eq!(parse_menu_choice("abc", 3), None);
        assert_eq!(parse_menu_choice("-1", 3), None);
        assert_eq!(parse_menu_choice("1", 0), None);
    }

    #[test]
    fn test_restart_keyword_matching() {
        assert!(is_restart("restart"));
        assert!(is_restart("  RESTART "));
        assert!(is_restart("Restart"));
        assert!(!is_restart("restart please"));
        assert!(!is_restart(""));
    }

    #[test]
    fn test_language_menu_choice() {
        assert_eq!(Language::from_menu_choice("1"), Some(Language::En));
        assert_eq!(Language::from_menu_choice("2"), Some(Language::Te));
        assert_eq!(Language::from_menu_choice("3"), None);
        assert_eq!(Language::from_menu_choice("english"), None);
    }

    #[test]
    fn test_restart_context_scope() {
        // Not available before the category phase
        assert!(Step::AwaitingLanguage.restart_context().is_none());
        assert!(Step::AwaitingCrop {
            language: Language::Te
        }
        .restart_context()
        .is_none());

        // Carries language, crop and the category snapshot afterwards
        let step = Step::AwaitingRestart {
            language: Language::Te,
            crop: "cotton".to_string(),
            categories: vec!["Herbicides".to_string()],
        };
        let (language, crop, categories) = step.restart_context().unwrap();
        assert_eq!(language, Language::Te);
        assert_eq!(crop, "cotton");
        assert_eq!(categories, vec!["Herbicides".to_string()]);
    }
}
