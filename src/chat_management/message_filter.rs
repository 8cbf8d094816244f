use super::ChatMessage;
use crate::error::CohostError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// チャットフィードの表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// すべてのメッセージ
    All,
    /// 質問のみ（ダッシュボードの初期表示）
    #[default]
    Questions,
    /// 未回答の質問のみ
    Unanswered,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Questions, FilterMode::Unanswered];

    /// メッセージがこのモードで表示対象かどうか
    pub fn matches(&self, message: &ChatMessage) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Questions => message.is_question,
            FilterMode::Unanswered => message.is_question && !message.answered,
        }
    }

    /// フィルターボタンの表示名
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "All Messages",
            FilterMode::Questions => "Questions Only",
            FilterMode::Unanswered => "Unanswered",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Questions => "questions",
            FilterMode::Unanswered => "unanswered",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = CohostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "questions" => Ok(FilterMode::Questions),
            "unanswered" => Ok(FilterMode::Unanswered),
            _ => Err(CohostError::unknown_value("filter mode", s)),
        }
    }
}

/// フィルター適用してメッセージリストを取得（順序は保持）
pub fn filter_messages(messages: &[ChatMessage], mode: FilterMode) -> Vec<ChatMessage> {
    messages
        .iter()
        .filter(|message| mode.matches(message))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_management::{ChatPriority, MessageId, Platform};
    use chrono::Utc;

    fn create_test_message(id: &str, is_question: bool, answered: bool) -> ChatMessage {
        ChatMessage {
            id: MessageId::new(id),
            username: "TestUser".to_string(),
            message: "How long have you been streaming?".to_string(),
            timestamp: Utc::now(),
            platform: Platform::Youtube,
            is_question,
            priority: ChatPriority::High,
            answered,
        }
    }

    fn ids(messages: &[ChatMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    fn mixed_messages() -> Vec<ChatMessage> {
        vec![
            create_test_message("1", true, false),
            create_test_message("2", false, false),
            create_test_message("3", true, true),
            create_test_message("4", true, false),
            create_test_message("5", false, true),
        ]
    }

    #[test]
    fn test_default_mode_is_questions() {
        assert_eq!(FilterMode::default(), FilterMode::Questions);
    }

    #[test]
    fn test_all_returns_everything() {
        let messages = mixed_messages();
        assert_eq!(filter_messages(&messages, FilterMode::All), messages);
    }

    #[test]
    fn test_questions_mode() {
        let filtered = filter_messages(&mixed_messages(), FilterMode::Questions);
        assert_eq!(ids(&filtered), vec!["1", "3", "4"]);
    }

    #[test]
    fn test_unanswered_mode() {
        let filtered = filter_messages(&mixed_messages(), FilterMode::Unanswered);
        assert_eq!(ids(&filtered), vec!["1", "4"]);
    }

    #[test]
    fn test_answered_statement_is_hidden_from_unanswered() {
        // 質問でないメッセージは回答状態に関係なく除外
        let message = create_test_message("x", false, false);
        assert!(!FilterMode::Unanswered.matches(&message));
    }

    #[test]
    fn test_empty_input() {
        for mode in FilterMode::ALL {
            assert!(filter_messages(&[], mode).is_empty());
        }
    }

    #[test]
    fn test_parse_and_labels() {
        assert_eq!("Unanswered".parse::<FilterMode>().unwrap(), FilterMode::Unanswered);
        assert!("recent".parse::<FilterMode>().is_err());
        assert_eq!(FilterMode::Questions.label(), "Questions Only");
        assert_eq!(FilterMode::All.to_string(), "all");
    }
}
