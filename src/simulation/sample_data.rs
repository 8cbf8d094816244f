//! ダッシュボード初期表示用のサンプルデータ
//!
//! 時刻は呼び出し側が渡す`now`からの相対値で作る。

use crate::chat_management::{
    AnswerBank, ChatMessage, ChatPriority, MessageId, MessageStore, Platform, PriorityMessage,
    QueuePriority, StoredResponse, DEFAULT_STORE_CAPACITY,
};
use chrono::{DateTime, Duration, Utc};

/// チャットフィードの初期メッセージ
pub fn sample_chat_messages(now: DateTime<Utc>) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            id: MessageId::new("1"),
            username: "GamerPro123".to_string(),
            message: "What's your favorite streaming setup?".to_string(),
            timestamp: now - Duration::seconds(30),
            platform: Platform::Twitch,
            is_question: true,
            priority: ChatPriority::High,
            answered: false,
        },
        ChatMessage {
            id: MessageId::new("2"),
            username: "StreamFan".to_string(),
            message: "How long have you been streaming?".to_string(),
            timestamp: now - Duration::seconds(45),
            platform: Platform::Youtube,
            is_question: true,
            priority: ChatPriority::Medium,
            answered: false,
        },
        ChatMessage {
            id: MessageId::new("3"),
            username: "ChatMaster".to_string(),
            message: "Great stream today! 🔥".to_string(),
            timestamp: now - Duration::seconds(10),
            platform: Platform::Twitch,
            is_question: false,
            priority: ChatPriority::Low,
            answered: false,
        },
        ChatMessage {
            id: MessageId::new("4"),
            username: "TechNerd".to_string(),
            message: "What microphone are you using?".to_string(),
            timestamp: now - Duration::seconds(60),
            platform: Platform::Discord,
            is_question: true,
            priority: ChatPriority::High,
            answered: true,
        },
    ]
}

/// サンプルメッセージを詰めたストア
pub fn sample_message_store(now: DateTime<Utc>) -> MessageStore {
    MessageStore::from_messages(sample_chat_messages(now), DEFAULT_STORE_CAPACITY)
}

/// 優先キューの初期データ（並び替え前）
pub fn sample_priority_messages() -> Vec<PriorityMessage> {
    vec![
        PriorityMessage {
            id: MessageId::new("1"),
            username: "PatientViewer".to_string(),
            message: "Been waiting 15 minutes - what's your favorite game genre?".to_string(),
            wait_time: 15,
            priority: QueuePriority::Urgent,
            platform: Platform::Twitch,
            similar_answered: 0,
        },
        PriorityMessage {
            id: MessageId::new("2"),
            username: "EagerFan".to_string(),
            message: "How do you handle stream lag issues?".to_string(),
            wait_time: 8,
            priority: QueuePriority::High,
            platform: Platform::Youtube,
            similar_answered: 1,
        },
        PriorityMessage {
            id: MessageId::new("3"),
            username: "CuriousGamer".to_string(),
            message: "What's your streaming schedule this week?".to_string(),
            wait_time: 12,
            priority: QueuePriority::High,
            platform: Platform::Discord,
            similar_answered: 0,
        },
        PriorityMessage {
            id: MessageId::new("4"),
            username: "RegularChatter".to_string(),
            message: "Do you ever play with viewers?".to_string(),
            wait_time: 5,
            priority: QueuePriority::Medium,
            platform: Platform::Twitch,
            similar_answered: 2,
        },
    ]
}

/// 回答バンクの初期データ
pub fn sample_responses(now: DateTime<Utc>) -> Vec<StoredResponse> {
    vec![
        StoredResponse {
            id: MessageId::new("1"),
            question: "What's your streaming setup?".to_string(),
            answer: "I use an Elgato Stream Deck, Blue Yeti microphone, and OBS Studio for streaming. My camera is a Logitech C920.".to_string(),
            category: "equipment".to_string(),
            confidence: 95,
            usage_count: 12,
            last_used: now - Duration::hours(1),
            created_at: now - Duration::days(7),
        },
        StoredResponse {
            id: MessageId::new("2"),
            question: "How long have you been streaming?".to_string(),
            answer: "I've been streaming for about 3 years now, started as a hobby and it grew from there!".to_string(),
            category: "personal".to_string(),
            confidence: 98,
            usage_count: 8,
            last_used: now - Duration::hours(2),
            created_at: now - Duration::days(30),
        },
        StoredResponse {
            id: MessageId::new("3"),
            question: "What games do you play?".to_string(),
            answer: "I mainly focus on indie games and occasional AAA titles. I love discovering hidden gems and sharing them with the community.".to_string(),
            category: "games".to_string(),
            confidence: 90,
            usage_count: 15,
            last_used: now - Duration::minutes(30),
            created_at: now - Duration::days(14),
        },
    ]
}

pub fn sample_answer_bank(now: DateTime<Utc>) -> AnswerBank {
    AnswerBank::new(sample_responses(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let now = Utc::now();

        let chat: HashSet<_> = sample_chat_messages(now).into_iter().map(|m| m.id).collect();
        assert_eq!(chat.len(), 4);

        let queue: HashSet<_> = sample_priority_messages().into_iter().map(|m| m.id).collect();
        assert_eq!(queue.len(), 4);

        let bank: HashSet<_> = sample_responses(now).into_iter().map(|r| r.id).collect();
        assert_eq!(bank.len(), 3);
    }

    #[test]
    fn test_sample_store_keeps_all_messages() {
        let store = sample_message_store(Utc::now());
        assert_eq!(store.len(), 4);
        assert_eq!(store.unanswered_count(), 2);
    }
}
