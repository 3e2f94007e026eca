//! Conversation engine module: interprets each inbound message against the
//! sender's current dialogue step and produces the reply segments.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::dialogue::{is_restart, parse_menu_choice, Language, Step};
use crate::localization::LocalizationManager;

use super::session::SessionStore;
use super::ui_builder::{display_name, format_item_list, format_numbered_list};

/// The conversation engine.
///
/// Owns the session store; the dataset and localization tables are shared
/// read-only collaborators injected at construction. Handling a message
/// has no side effect beyond mutating that sender's session.
pub struct Engine {
    dataset: Arc<Dataset>,
    localization: Arc<LocalizationManager>,
    sessions: SessionStore,
}

impl Engine {
    pub fn new(dataset: Arc<Dataset>, localization: Arc<LocalizationManager>) -> Self {
        Self {
            dataset,
            localization,
            sessions: SessionStore::new(),
        }
    }

    /// Handle one inbound message and return the reply text segments.
    ///
    /// Every path produces a valid reply: invalid input re-issues the
    /// current prompt without advancing the step. The only empty reply is
    /// a non-keyword message while waiting for `restart`, which is
    /// deliberately dropped.
    pub async fn handle(&self, sender: &str, body: &str) -> Vec<String> {
        let message = body.trim();

        let (next, replies) = match self.sessions.get(sender).await {
            None => {
                // First contact always greets, whatever the message says.
                debug!(sender, "starting new session");
                (
                    Step::AwaitingLanguage,
                    vec![self.localization.text("greeting", Language::En)],
                )
            }
            Some(step) => {
                if is_restart(message) {
                    if let Some((language, crop, categories)) = step.restart_context() {
                        debug!(sender, "restarting at category menu");
                        let reply = self.category_prompt(language, &categories);
                        let next = Step::AwaitingCategory {
                            language,
                            crop,
                            categories,
                        };
                        self.sessions.put(sender, next).await;
                        return vec![reply];
                    }
                    // Before the category phase the keyword is ordinary input.
                }
                debug!(sender, step = step.name(), "handling message");
                self.advance(step, message)
            }
        };

        self.sessions.put(sender, next).await;
        replies
    }

    /// Current dialogue step for a sender, if any.
    pub async fn session(&self, sender: &str) -> Option<Step> {
        self.sessions.get(sender).await
    }

    /// Run one step transition: returns the next step and reply segments.
    fn advance(&self, step: Step, message: &str) -> (Step, Vec<String>) {
        match step {
            Step::AwaitingLanguage => self.on_language(message),
            Step::AwaitingCrop { language } => self.on_crop(message, language),
            Step::AwaitingCategory {
                language,
                crop,
                categories,
            } => self.on_category(message, language, crop, categories),
            Step::AwaitingItemA {
                language,
                crop,
                categories,
                category,
                items_a,
            } => self.on_item_a(message, language, crop, categories, category, items_a),
            Step::AwaitingItemB {
                language,
                crop,
                categories,
                category,
                item_a,
                items_b,
            } => self.on_item_b(message, language, crop, categories, category, item_a, items_b),
            Step::AwaitingRestart {
                language,
                crop,
                categories,
            } => {
                // Only the restart keyword is meaningful here; anything else
                // is dropped without a reply segment.
                debug!("ignoring message while awaiting restart");
                (
                    Step::AwaitingRestart {
                        language,
                        crop,
                        categories,
                    },
                    Vec::new(),
                )
            }
        }
    }

    fn on_language(&self, message: &str) -> (Step, Vec<String>) {
        match Language::from_menu_choice(message) {
            Some(language) => (
                Step::AwaitingCrop { language },
                vec![self.localization.text("ask-crop", language)],
            ),
            None => (
                Step::AwaitingLanguage,
                vec![self.localization.text("greeting", Language::En)],
            ),
        }
    }

    fn on_crop(&self, message: &str, language: Language) -> (Step, Vec<String>) {
        if message.is_empty() {
            return (
                Step::AwaitingCrop { language },
                vec![self.localization.text("ask-crop", language)],
            );
        }

        let categories = self.dataset.category_names();
        if categories.is_empty() {
            warn!("no compatibility data loaded, cannot offer categories");
            return (
                Step::AwaitingCrop { language },
                vec![self.localization.text("no-dataset", language)],
            );
        }

        let reply = self.category_prompt(language, &categories);
        (
            Step::AwaitingCategory {
                language,
                crop: message.to_string(),
                categories,
            },
            vec![reply],
        )
    }

    fn on_category(
        &self,
        message: &str,
        language: Language,
        crop: String,
        categories: Vec<String>,
    ) -> (Step, Vec<String>) {
        match parse_menu_choice(message, categories.len()) {
            Some(index) => {
                let category = categories[index].clone();
                let items_a = self
                    .dataset
                    .table(&category)
                    .map(|table| table.first_items())
                    .unwrap_or_default();

                let reply = self.item_prompt("ask-first-pesticide", language, &items_a);
                (
                    Step::AwaitingItemA {
                        language,
                        crop,
                        categories,
                        category,
                        items_a,
                    },
                    vec![reply],
                )
            }
            None => {
                let reply = self.category_prompt(language, &categories);
                (
                    Step::AwaitingCategory {
                        language,
                        crop,
                        categories,
                    },
                    vec![reply],
                )
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn on_item_a(
        &self,
        message: &str,
        language: Language,
        crop: String,
        categories: Vec<String>,
        category: String,
        items_a: Vec<String>,
    ) -> (Step, Vec<String>) {
        match parse_menu_choice(message, items_a.len()) {
            Some(index) => {
                let item_a = items_a[index].clone();
                let items_b = self
                    .dataset
                    .table(&category)
                    .map(|table| table.second_items())
                    .unwrap_or_default();

                let reply = self.item_prompt("ask-second-pesticide", language, &items_b);
                (
                    Step::AwaitingItemB {
                        language,
                        crop,
                        categories,
                        category,
                        item_a,
                        items_b,
                    },
                    vec![reply],
                )
            }
            None => {
                let reply = self.item_prompt("ask-first-pesticide", language, &items_a);
                (
                    Step::AwaitingItemA {
                        language,
                        crop,
                        categories,
                        category,
                        items_a,
                    },
                    vec![reply],
                )
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn on_item_b(
        &self,
        message: &str,
        language: Language,
        crop: String,
        categories: Vec<String>,
        category: String,
        item_a: String,
        items_b: Vec<String>,
    ) -> (Step, Vec<String>) {
        match parse_menu_choice(message, items_b.len()) {
            Some(index) => {
                let item_b = items_b[index].clone();

                // Exact-identity lookup on the canonical names; display
                // names are applied to the reply only.
                let row = self
                    .dataset
                    .table(&category)
                    .and_then(|table| table.lookup(&item_a, &item_b));

                let verdict_reply = match row {
                    Some(row) => {
                        info!(
                            category = %category,
                            item_a = %item_a,
                            item_b = %item_b,
                            verdict = %row.verdict,
                            "compatibility verdict found"
                        );
                        self.localization.text_with_args(
                            "compatibility-result",
                            language,
                            &[
                                ("item_a", display_name(&item_a, language)),
                                ("item_b", display_name(&item_b, language)),
                                ("verdict", row.verdict.as_str()),
                            ],
                        )
                    }
                    None => {
                        info!(
                            category = %category,
                            item_a = %item_a,
                            item_b = %item_b,
                            "no compatibility row for pair"
                        );
                        self.localization.text("no-data", language)
                    }
                };

                (
                    Step::AwaitingRestart {
                        language,
                        crop,
                        categories,
                    },
                    vec![
                        verdict_reply,
                        self.localization.text("restart-hint", language),
                    ],
                )
            }
            None => {
                let reply = self.item_prompt("ask-second-pesticide", language, &items_b);
                (
                    Step::AwaitingItemB {
                        language,
                        crop,
                        categories,
                        category,
                        item_a,
                        items_b,
                    },
                    vec![reply],
                )
            }
        }
    }

    /// Category prompt plus the numbered category menu.
    fn category_prompt(&self, language: Language, categories: &[String]) -> String {
        format!(
            "{}\n{}",
            self.localization.text("ask-category", language),
            format_numbered_list(categories)
        )
    }

    /// Pesticide selection prompt plus the numbered, localized item menu.
    fn item_prompt(&self, key: &str, language: Language, items: &[String]) -> String {
        format!(
            "{}\n{}",
            self.localization.text(key, language),
            format_item_list(items, language)
        )
    }
}
