//! 優先キュー
//!
//! 回答待ちメッセージを優先度段階→待ち時間の順に並べる。

use super::{MessageId, Platform, QueuePriority};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// 回答待ちメッセージ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriorityMessage {
    pub id: MessageId,
    pub username: String,
    pub message: String,
    /// 待ち時間（分）
    pub wait_time: u32,
    pub priority: QueuePriority,
    pub platform: Platform,
    /// 既に回答済みの類似質問数
    pub similar_answered: u32,
}

impl PriorityMessage {
    /// 長時間待ちの警告を出すべきか
    pub fn needs_attention(&self) -> bool {
        self.priority == QueuePriority::Urgent
    }

    pub fn has_similar_answered(&self) -> bool {
        self.similar_answered > 0
    }

    pub fn formatted_wait_time(&self) -> String {
        format_wait_time(self.wait_time)
    }
}

/// 優先度の重み（降順）→待ち時間（降順）で安定ソートした新しい列を返す
pub fn rank_messages(messages: &[PriorityMessage]) -> Vec<PriorityMessage> {
    let mut ranked = messages.to_vec();
    // sort_by_keyは安定ソートなので同順位は入力順を保つ
    ranked.sort_by_key(|m| (Reverse(m.priority.weight()), Reverse(m.wait_time)));
    ranked
}

/// 待ち時間を表示用文字列に変換
pub fn format_wait_time(minutes: u32) -> String {
    if minutes < 1 {
        return "< 1min".to_string();
    }
    if minutes < 60 {
        return format!("{}min", minutes);
    }
    format!("{}h {}min", minutes / 60, minutes % 60)
}

/// キューの件数サマリー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QueueSummary {
    pub pending: usize,
    pub urgent: usize,
}

impl QueueSummary {
    pub fn from_messages(messages: &[PriorityMessage]) -> Self {
        Self {
            pending: messages.len(),
            urgent: messages.iter().filter(|m| m.needs_attention()).count(),
        }
    }

    /// 「N pending」バッジ
    pub fn badge(&self) -> String {
        format!("{} pending", self.pending)
    }
}
