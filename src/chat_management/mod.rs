pub mod answer_bank;
pub mod message_filter;
pub mod message_store;
pub mod priority_queue;

pub use answer_bank::*;
pub use message_filter::*;
pub use message_store::*;
pub use priority_queue::*;

use crate::error::CohostError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// メッセージID（コレクション内で一意）
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 配信プラットフォーム
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitch,
    Youtube,
    Discord,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitch, Platform::Youtube, Platform::Discord];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Youtube => "youtube",
            Platform::Discord => "discord",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CohostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitch" => Ok(Platform::Twitch),
            "youtube" => Ok(Platform::Youtube),
            "discord" => Ok(Platform::Discord),
            _ => Err(CohostError::unknown_value("platform", s)),
        }
    }
}

/// チャットメッセージの優先度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChatPriority {
    High,
    Medium,
    Low,
}

impl ChatPriority {
    pub const ALL: [ChatPriority; 3] = [ChatPriority::High, ChatPriority::Medium, ChatPriority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatPriority::High => "high",
            ChatPriority::Medium => "medium",
            ChatPriority::Low => "low",
        }
    }
}

impl std::fmt::Display for ChatPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ChatPriority {
    type Err = CohostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(ChatPriority::High),
            "medium" => Ok(ChatPriority::Medium),
            "low" => Ok(ChatPriority::Low),
            _ => Err(CohostError::unknown_value("chat priority", s)),
        }
    }
}

/// 優先キューの段階
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QueuePriority {
    Urgent = 3,
    High = 2,
    Medium = 1,
}

impl QueuePriority {
    /// 並び替えに使う重み（大きいほど先頭）
    pub fn weight(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueuePriority::Urgent => "urgent",
            QueuePriority::High => "high",
            QueuePriority::Medium => "medium",
        }
    }
}

impl std::fmt::Display for QueuePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for QueuePriority {
    type Err = CohostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urgent" => Ok(QueuePriority::Urgent),
            "high" => Ok(QueuePriority::High),
            "medium" => Ok(QueuePriority::Medium),
            _ => Err(CohostError::unknown_value("queue priority", s)),
        }
    }
}
