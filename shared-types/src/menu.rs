use crate::navigation::NavToken;
use serde::{Deserialize, Serialize};

/// One selectable entry of a menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub token: NavToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub header: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }
}

/// What the bot shows next: another menu, or a terminal text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Menu(Menu),
    Text { text: String },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text { text: text.into() }
    }

    /// The message body, the menu header for menus
    pub fn body(&self) -> &str {
        match self {
            Reply::Menu(menu) => &menu.header,
            Reply::Text { text } => text,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        match self {
            Reply::Menu(menu) => &menu.items,
            Reply::Text { .. } => &[],
        }
    }
}
