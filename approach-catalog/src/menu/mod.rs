#[cfg(test)]
mod tests;

use crate::client::CatalogClient;
use crate::models::Approach;
use shared_types::{Menu, MenuItem, NavToken, Reply};
use tracing::debug;

pub const ROOT_HEADER: &str = "Select a topic:";
pub const NO_APPROACH_MESSAGE: &str = "No approach found for this question.";

/// Maps a navigation token plus the catalog contents to the next reply.
///
/// Holds no conversation state: every call is resolved from the token it is
/// given.
#[derive(Clone)]
pub struct MenuResolver {
    catalog: CatalogClient,
}

impl MenuResolver {
    pub fn new(catalog: CatalogClient) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Topic menu shown for the start command. May be empty.
    pub async fn root(&self) -> Reply {
        let items = self
            .catalog
            .list_topics()
            .await
            .into_iter()
            .map(|topic| MenuItem {
                token: NavToken::topic(topic.clone()),
                label: topic,
            })
            .collect();

        Reply::Menu(Menu {
            header: ROOT_HEADER.to_string(),
            items,
        })
    }

    pub async fn select(&self, token: &NavToken) -> Reply {
        match token {
            NavToken::Topic { name } => self.select_topic(name).await,
            NavToken::Question { topic, text } => {
                self.select_question(topic.as_deref(), text).await
            }
        }
    }

    /// Decode a raw callback payload and resolve it
    pub async fn select_payload(&self, payload: &str) -> Reply {
        let token = NavToken::decode(payload);
        debug!(?token, "Resolving selection");
        self.select(&token).await
    }

    async fn select_topic(&self, topic: &str) -> Reply {
        let questions = self.catalog.list_questions(topic).await;
        if questions.is_empty() {
            return Reply::text(format!("No questions found for {}.", topic));
        }

        let items = questions
            .into_iter()
            .map(|text| MenuItem {
                token: NavToken::question_button(topic, text.clone()),
                label: text,
            })
            .collect();

        Reply::Menu(Menu {
            header: format!(
                "Here are some questions for {}: Select one to view the approach.",
                topic
            ),
            items,
        })
    }

    async fn select_question(&self, topic: Option<&str>, text: &str) -> Reply {
        let approach = match topic {
            Some(topic) => self.catalog.get_approach_in_topic(topic, text).await,
            None => self.catalog.get_approach(text).await,
        };

        match approach {
            Some(approach) if has_answer(&approach) => Reply::text(format!(
                "Approach: {}\nIntuition: {}",
                approach.approach, approach.intuition
            )),
            _ => Reply::text(NO_APPROACH_MESSAGE),
        }
    }
}

// A stored record with an empty approach or intuition counts as unanswered
fn has_answer(approach: &Approach) -> bool {
    !approach.approach.is_empty() && !approach.intuition.is_empty()
}
