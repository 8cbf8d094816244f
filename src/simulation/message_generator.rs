//! チャット受信のシミュレーション用メッセージ生成器
//!
//! 乱数源は外から注入する。固定の候補集合からの一様抽選と
//! ベルヌーイ試行だけで構成し、それ以上の推定は行わない。

use crate::chat_management::{ChatMessage, ChatPriority, MessageId, MessageStore, Platform};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 生成メッセージの本文候補
pub const SIMULATED_PHRASES: [&str; 5] = [
    "What's your streaming schedule?",
    "Love the content!",
    "Can you play this song?",
    "How do you stay motivated?",
    "Amazing gameplay!",
];

/// 質問として生成される確率
pub const DEFAULT_QUESTION_PROBABILITY: f64 = 0.6;

/// ユーザー名の番号の上限（`User0`〜`User999`）
const USERNAME_RANGE: u32 = 1000;

/// メッセージ生成器
#[derive(Debug)]
pub struct MessageGenerator<R: Rng> {
    rng: R,
    next_sequence: u64,
    question_probability: f64,
}

impl MessageGenerator<StdRng> {
    /// OSの乱数でシードした生成器
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// 固定シードの生成器（テスト・再現用）
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MessageGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            next_sequence: 1,
            question_probability: DEFAULT_QUESTION_PROBABILITY,
        }
    }

    /// 質問確率を設定（0.0〜1.0に丸める）
    pub fn with_question_probability(mut self, probability: f64) -> Self {
        self.question_probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            tracing::warn!(
                "⚠️ 不正な質問確率 {} のため既定値 {} を使用",
                probability,
                DEFAULT_QUESTION_PROBABILITY
            );
            DEFAULT_QUESTION_PROBABILITY
        };
        self
    }

    pub fn question_probability(&self) -> f64 {
        self.question_probability
    }

    /// ストア内のIDと重複しない新しいメッセージを1件生成
    pub fn generate(&mut self, now: DateTime<Utc>, store: &MessageStore) -> ChatMessage {
        let id = self.next_id(store);
        let username = format!("User{}", self.rng.gen_range(0..USERNAME_RANGE));
        let message = SIMULATED_PHRASES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(SIMULATED_PHRASES[0])
            .to_string();
        let platform = Platform::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Platform::Twitch);
        let is_question = self.rng.gen_bool(self.question_probability);
        let priority = ChatPriority::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(ChatPriority::Medium);

        ChatMessage {
            id,
            username,
            message,
            timestamp: now,
            platform,
            is_question,
            priority,
            answered: false,
        }
    }

    /// 1件生成して先頭に追加した新しいストアを返す
    pub fn ingest(&mut self, store: &MessageStore, now: DateTime<Utc>) -> (MessageStore, ChatMessage) {
        let message = self.generate(now, store);
        (store.prepend(message.clone()), message)
    }

    fn next_id(&mut self, store: &MessageStore) -> MessageId {
        loop {
            let candidate = MessageId::new(format!("live-{}", self.next_sequence));
            self.next_sequence += 1;
            if !store.contains(&candidate) {
                return candidate;
            }
        }
    }
}
