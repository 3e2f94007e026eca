use anyhow::Result;

use tankmix::dialogue::{is_restart, parse_menu_choice, Language, Step};

/// Integration test for menu choice parsing
#[test]
fn test_menu_choice_bounds() {
    assert_eq!(parse_menu_choice("1", 5), Some(0));
    assert_eq!(parse_menu_choice("5", 5), Some(4));
    assert_eq!(parse_menu_choice("6", 5), None);
    assert_eq!(parse_menu_choice("0", 5), None);
    assert_eq!(parse_menu_choice("two", 5), None);
    assert_eq!(parse_menu_choice("1.5", 5), None);
}

/// Test restart keyword recognition edge cases
#[test]
fn test_restart_keyword() {
    assert!(is_restart("restart"));
    assert!(is_restart("RESTART"));
    assert!(is_restart("\trestart\n"));
    assert!(!is_restart("restart now"));
    assert!(!is_restart("re start"));
}

/// Test dialogue step structure and serialization
#[tokio::test]
async fn test_step_serialization_round_trip() -> Result<()> {
    let step = Step::AwaitingItemB {
        language: Language::Te,
        crop: "cotton".to_string(),
        categories: vec!["Herbicides".to_string(), "Insecticides".to_string()],
        category: "Herbicides".to_string(),
        item_a: "Glyphosate".to_string(),
        items_b: vec!["Diquat".to_string()],
    };

    let serialized = serde_json::to_string(&step)?;
    let deserialized: Step = serde_json::from_str(&serialized)?;
    assert_eq!(step, deserialized);

    match deserialized {
        Step::AwaitingItemB { item_a, items_b, .. } => {
            assert_eq!(item_a, "Glyphosate");
            assert_eq!(items_b, vec!["Diquat".to_string()]);
        }
        _ => panic!("Unexpected dialogue step"),
    }

    Ok(())
}

/// Test default step
#[test]
fn test_default_step_is_language_selection() {
    let step = Step::default();
    assert!(matches!(step, Step::AwaitingLanguage));
    assert_eq!(step.name(), "awaiting_language");
    assert_eq!(step.language(), None);
}
