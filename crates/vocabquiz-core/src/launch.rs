//! External launch actions.
//!
//! Something outside the quiz (a shortcut, a search result, a widget tap) can
//! ask for a quiz to start, optionally on a given item. The request travels as
//! a [`LaunchAction`] through a [`LaunchInbox`], which hands it out once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::IdentityKey;

/// What opened the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchSource {
    QuickAction,
    Shortcut,
    Search,
    MultipleItemsWidget,
    RandomItemWidget,
}

impl fmt::Display for LaunchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchSource::QuickAction => write!(f, "quick-action"),
            LaunchSource::Shortcut => write!(f, "shortcut"),
            LaunchSource::Search => write!(f, "search"),
            LaunchSource::MultipleItemsWidget => write!(f, "multiple-items-widget"),
            LaunchSource::RandomItemWidget => write!(f, "random-item-widget"),
        }
    }
}

impl FromStr for LaunchSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quick-action" | "quickaction" => Ok(LaunchSource::QuickAction),
            "shortcut" => Ok(LaunchSource::Shortcut),
            "search" | "spotlight" => Ok(LaunchSource::Search),
            "multiple-items-widget" | "widget-multiple" => Ok(LaunchSource::MultipleItemsWidget),
            "random-item-widget" | "widget-random" => Ok(LaunchSource::RandomItemWidget),
            other => Err(format!("unknown launch source: {other}")),
        }
    }
}

/// A request from outside to start the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LaunchAction {
    /// Start the quiz, on `item` when given or on a random question otherwise.
    StartQuiz {
        source: LaunchSource,
        #[serde(default)]
        item: Option<IdentityKey>,
    },
}

impl LaunchAction {
    pub fn source(&self) -> LaunchSource {
        match self {
            LaunchAction::StartQuiz { source, .. } => *source,
        }
    }
}

/// Holds at most one pending [`LaunchAction`].
///
/// Delivering twice before a take keeps only the latest action; taking empties
/// the inbox, so each action is handled exactly once.
#[derive(Debug, Default)]
pub struct LaunchInbox {
    pending: Option<LaunchAction>,
}

impl LaunchInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliver(&mut self, action: LaunchAction) {
        if let Some(replaced) = self.pending.replace(action) {
            tracing::debug!(source = %replaced.source(), "dropping unhandled launch action");
        }
    }

    pub fn take(&mut self) -> Option<LaunchAction> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_display_and_parse() {
        for source in [
            LaunchSource::QuickAction,
            LaunchSource::Shortcut,
            LaunchSource::Search,
            LaunchSource::MultipleItemsWidget,
            LaunchSource::RandomItemWidget,
        ] {
            assert_eq!(source.to_string().parse::<LaunchSource>().unwrap(), source);
        }
        assert_eq!(
            "Spotlight".parse::<LaunchSource>().unwrap(),
            LaunchSource::Search
        );
        assert!("notification".parse::<LaunchSource>().is_err());
    }

    #[test]
    fn inbox_hands_out_action_once() {
        let mut inbox = LaunchInbox::new();
        assert!(inbox.take().is_none());

        let action = LaunchAction::StartQuiz {
            source: LaunchSource::Search,
            item: Some(IdentityKey::new("english", "spanish", "hello", "hola")),
        };
        inbox.deliver(action.clone());
        assert!(inbox.has_pending());
        assert_eq!(inbox.take(), Some(action));
        assert_eq!(inbox.take(), None);
    }

    #[test]
    fn identical_actions_are_each_delivered() {
        let mut inbox = LaunchInbox::new();
        let action = LaunchAction::StartQuiz {
            source: LaunchSource::QuickAction,
            item: None,
        };

        inbox.deliver(action.clone());
        assert_eq!(inbox.take(), Some(action.clone()));
        inbox.deliver(action.clone());
        assert_eq!(inbox.take(), Some(action));
    }

    #[test]
    fn later_delivery_replaces_pending() {
        let mut inbox = LaunchInbox::new();
        inbox.deliver(LaunchAction::StartQuiz {
            source: LaunchSource::Shortcut,
            item: None,
        });
        inbox.deliver(LaunchAction::StartQuiz {
            source: LaunchSource::RandomItemWidget,
            item: None,
        });
        assert_eq!(
            inbox.take().map(|a| a.source()),
            Some(LaunchSource::RandomItemWidget)
        );
        assert!(!inbox.has_pending());
    }

    #[test]
    fn action_json_shape() {
        let action = LaunchAction::StartQuiz {
            source: LaunchSource::MultipleItemsWidget,
            item: None,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"action":"start_quiz","source":"multiple-items-widget","item":null}"#
        );
        let back: LaunchAction = serde_json::from_str(r#"{"action":"start_quiz","source":"search"}"#).unwrap();
        assert_eq!(back.source(), LaunchSource::Search);
    }
}
