//! チャットメッセージストア
//!
//! 新しいメッセージを先頭に持つ順序付きコレクション。
//! 更新はすべて新しい値を返し、既存の値は書き換えない。

use super::{ChatPriority, MessageId, Platform};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ストアが保持するメッセージの上限
pub const DEFAULT_STORE_CAPACITY: usize = 20;

/// 受信チャットメッセージ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub username: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub platform: Platform,
    pub is_question: bool,
    pub priority: ChatPriority,
    pub answered: bool,
}

impl ChatMessage {
    /// 回答待ちの質問かどうか（「回答済みにする」操作の対象）
    pub fn awaits_answer(&self) -> bool {
        self.is_question && !self.answered
    }

    /// アバター表示用のイニシャル（先頭2文字を大文字化）
    pub fn initials(&self) -> String {
        self.username.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// 指定IDのメッセージを回答済みにした新しいコレクションを返す
///
/// 該当IDがなければ入力と同じ内容を返す。何度適用しても結果は変わらない。
pub fn mark_answered(messages: &[ChatMessage], id: &MessageId) -> Vec<ChatMessage> {
    messages
        .iter()
        .map(|message| {
            if &message.id == id {
                ChatMessage {
                    answered: true,
                    ..message.clone()
                }
            } else {
                message.clone()
            }
        })
        .collect()
}

/// 容量付きメッセージストア
///
/// 容量は常に`1..=DEFAULT_STORE_CAPACITY`に収まる。
/// デシリアライズも`from_messages`を通すので重複IDや容量超過は残らない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredMessages")]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
    capacity: usize,
}

/// デシリアライズ直後の未検証の形
#[derive(Deserialize)]
struct StoredMessages {
    #[serde(default)]
    messages: Vec<ChatMessage>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_STORE_CAPACITY
}

impl From<StoredMessages> for MessageStore {
    fn from(stored: StoredMessages) -> Self {
        Self::from_messages(stored.messages, stored.capacity)
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_CAPACITY)
    }
}

impl MessageStore {
    /// 空のストアを作成
    ///
    /// 容量は1から`DEFAULT_STORE_CAPACITY`の範囲に丸める。上限は下げられるが上げられない。
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            capacity: capacity.clamp(1, DEFAULT_STORE_CAPACITY),
        }
    }

    /// 既存メッセージからストアを作成
    ///
    /// 先頭が最新。容量を超える分は末尾（古い側）から捨てる。
    /// IDが重複する場合は先に現れたものだけを残す。
    pub fn from_messages(messages: Vec<ChatMessage>, capacity: usize) -> Self {
        let mut unique: Vec<ChatMessage> = Vec::with_capacity(messages.len());
        for message in messages {
            if unique.iter().any(|m| m.id == message.id) {
                tracing::warn!("⚠️ 重複したメッセージIDを無視しました: {}", message.id);
                continue;
            }
            unique.push(message);
        }

        let mut store = Self::new(capacity);
        unique.truncate(store.capacity);
        store.messages = unique;
        store
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| &m.id == id)
    }

    pub fn get(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| &m.id == id)
    }

    /// メッセージを先頭に追加し、容量を超えた古いメッセージを捨てた新しいストアを返す
    ///
    /// 既に同じIDがある場合はストアをそのまま返す。
    pub fn prepend(&self, message: ChatMessage) -> Self {
        if self.contains(&message.id) {
            tracing::warn!("⚠️ 既存のIDと重複するため追加しません: {}", message.id);
            return self.clone();
        }

        let mut messages = Vec::with_capacity(self.capacity);
        messages.push(message);
        messages.extend(
            self.messages
                .iter()
                .take(self.capacity.saturating_sub(1))
                .cloned(),
        );

        Self {
            messages,
            capacity: self.capacity,
        }
    }

    /// 指定IDを回答済みにした新しいストアを返す
    pub fn mark_answered(&self, id: &MessageId) -> Self {
        Self {
            messages: mark_answered(&self.messages, id),
            capacity: self.capacity,
        }
    }

    /// 回答待ちの質問数
    pub fn unanswered_count(&self) -> usize {
        self.messages.iter().filter(|m| m.awaits_answer()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_message(id: &str, is_question: bool, answered: bool) -> ChatMessage {
        ChatMessage {
            id: MessageId::new(id),
            username: format!("User{}", id),
            message: "テストメッセージ".to_string(),
            timestamp: Utc::now(),
            platform: Platform::Twitch,
            is_question,
            priority: ChatPriority::Medium,
            answered,
        }
    }

    #[test]
    fn test_mark_answered_updates_only_target() {
        let messages = vec![
            create_test_message("1", true, false),
            create_test_message("2", true, false),
        ];

        let updated = mark_answered(&messages, &MessageId::new("2"));

        assert!(!updated[0].answered);
        assert!(updated[1].answered);
        assert_eq!(updated[1].username, messages[1].username);
        // 入力は書き換えない
        assert!(!messages[1].answered);
    }

    #[test]
    fn test_mark_answered_unknown_id_is_noop() {
        let messages = vec![create_test_message("1", true, false)];
        let updated = mark_answered(&messages, &MessageId::new("999"));
        assert_eq!(updated, messages);
    }

    #[test]
    fn test_mark_answered_is_idempotent() {
        let messages = vec![
            create_test_message("1", true, false),
            create_test_message("2", false, false),
        ];
        let id = MessageId::new("1");

        let once = mark_answered(&messages, &id);
        let twice = mark_answered(&once, &id);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let store = MessageStore::new(5)
            .prepend(create_test_message("a", false, false))
            .prepend(create_test_message("b", false, false));

        let ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_prepend_evicts_oldest_when_full() {
        let mut store = MessageStore::new(3);
        for i in 0..5 {
            store = store.prepend(create_test_message(&i.to_string(), false, false));
        }

        let ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_prepend_rejects_duplicate_id() {
        let store = MessageStore::default().prepend(create_test_message("1", true, false));
        let again = store.prepend(create_test_message("1", false, false));
        assert_eq!(again, store);
    }

    #[test]
    fn test_prepend_leaves_original_untouched() {
        let store = MessageStore::default().prepend(create_test_message("1", true, false));
        let _next = store.prepend(create_test_message("2", true, false));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_messages_truncates_and_dedupes() {
        let messages = vec![
            create_test_message("1", true, false),
            create_test_message("1", false, false),
            create_test_message("2", true, false),
            create_test_message("3", true, false),
        ];
        let store = MessageStore::from_messages(messages, 2);

        let ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(store.get(&MessageId::new("1")).unwrap().is_question);
    }

    #[test]
    fn test_zero_capacity_is_treated_as_one() {
        let store = MessageStore::new(0)
            .prepend(create_test_message("1", false, false))
            .prepend(create_test_message("2", false, false));
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_above_limit_is_clamped() {
        let mut store = MessageStore::new(50);
        assert_eq!(store.capacity(), DEFAULT_STORE_CAPACITY);

        for i in 0..45 {
            store = store.prepend(create_test_message(&i.to_string(), false, false));
        }
        assert_eq!(store.len(), DEFAULT_STORE_CAPACITY);
        assert_eq!(store.messages()[0].id.as_str(), "44");

        let messages: Vec<ChatMessage> = (0..30)
            .map(|i| create_test_message(&i.to_string(), false, false))
            .collect();
        let store = MessageStore::from_messages(messages, 100);
        assert_eq!(store.capacity(), DEFAULT_STORE_CAPACITY);
        assert_eq!(store.len(), DEFAULT_STORE_CAPACITY);
    }

    #[test]
    fn test_deserialize_enforces_store_invariants() {
        let store: MessageStore =
            serde_json::from_str(r#"{"messages":[],"capacity":0}"#).unwrap();
        assert_eq!(store.capacity(), 1);
        let store = store
            .prepend(create_test_message("1", false, false))
            .prepend(create_test_message("2", false, false));
        assert_eq!(store.len(), 1);

        let messages = vec![
            create_test_message("1", true, false),
            create_test_message("1", false, false),
            create_test_message("2", true, false),
            create_test_message("3", true, false),
        ];
        let json = serde_json::json!({ "messages": messages, "capacity": 2 }).to_string();
        let store: MessageStore = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = store.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let store: MessageStore = serde_json::from_str(r#"{"messages":[],"capacity":500}"#).unwrap();
        assert_eq!(store.capacity(), DEFAULT_STORE_CAPACITY);
    }

    #[test]
    fn test_serialize_roundtrip_keeps_store() {
        let store = MessageStore::new(3).prepend(create_test_message("1", true, false));
        let json = serde_json::to_string(&store).unwrap();
        let restored: MessageStore = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_unanswered_count() {
        let store = MessageStore::from_messages(
            vec![
                create_test_message("1", true, false),
                create_test_message("2", true, true),
                create_test_message("3", false, false),
            ],
            DEFAULT_STORE_CAPACITY,
        );
        assert_eq!(store.unanswered_count(), 1);
        assert_eq!(
            store.mark_answered(&MessageId::new("1")).unanswered_count(),
            0
        );
    }

    #[test]
    fn test_initials() {
        let message = create_test_message("1", false, false);
        assert_eq!(message.initials(), "US");
    }
}
