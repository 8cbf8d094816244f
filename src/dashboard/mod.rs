//! ダッシュボードの表示状態
//!
//! タブ・音声トグル・フィルターなどの画面状態をイベントで更新する。
//! `apply`は常に新しい状態を返す。

pub mod config_manager;

use crate::chat_management::{FilterMode, ALL_CATEGORIES};
use crate::error::CohostError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// アクティブタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Chat,
    Memory,
    Queue,
}

impl ActiveTab {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Chat => "Active Chat",
            ActiveTab::Memory => "Memory Bank",
            ActiveTab::Queue => "Priority Queue",
        }
    }
}

impl FromStr for ActiveTab {
    type Err = CohostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(ActiveTab::Chat),
            "memory" => Ok(ActiveTab::Memory),
            "queue" => Ok(ActiveTab::Queue),
            _ => Err(CohostError::unknown_value("tab", s)),
        }
    }
}

/// 音声コントロール設定
///
/// 値は表示用のみ。実際の音声処理は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub enabled: bool,
    /// 0〜100
    pub listening_level: u8,
    /// 0〜100
    pub output_volume: u8,
    /// 応答までの遅延（秒）
    pub response_delay_secs: u8,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            listening_level: 67,
            output_volume: 85,
            response_delay_secs: 3,
        }
    }
}

impl VoiceSettings {
    pub fn status_text(&self) -> &'static str {
        if self.enabled {
            "Listening for responses..."
        } else {
            "Voice detection off"
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.enabled {
            "Voice On"
        } else {
            "Voice Off"
        }
    }

    /// 遅延バーの充填率（1秒=20%）
    pub fn response_delay_percent(&self) -> u8 {
        self.response_delay_secs.saturating_mul(20).min(100)
    }

    /// 範囲外の値を丸めた設定を返す
    pub fn sanitized(&self) -> Self {
        Self {
            enabled: self.enabled,
            listening_level: clamp_percent(self.listening_level),
            output_volume: clamp_percent(self.output_volume),
            response_delay_secs: self.response_delay_secs,
        }
    }
}

fn clamp_percent(value: u8) -> u8 {
    value.min(100)
}

/// ダッシュボード操作イベント
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    TabSelected(ActiveTab),
    VoiceToggled,
    FilterChanged(FilterMode),
    SearchChanged(String),
    CategorySelected(String),
    ListeningLevelChanged(u8),
    OutputVolumeChanged(u8),
    ResponseDelayChanged(u8),
}

/// ダッシュボード全体の表示状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_tab: ActiveTab,
    pub voice: VoiceSettings,
    pub filter_mode: FilterMode,
    pub search_term: String,
    pub selected_category: String,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_tab: ActiveTab::default(),
            voice: VoiceSettings::default(),
            filter_mode: FilterMode::default(),
            search_term: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl DashboardState {
    /// 設定から初期状態を作成
    pub fn from_config(config: &config_manager::AppConfig) -> Self {
        Self {
            voice: config.voice.sanitized(),
            filter_mode: config.feed.default_filter,
            ..Default::default()
        }
    }

    /// イベントを適用した新しい状態を返す
    pub fn apply(&self, event: AppEvent) -> Self {
        let mut next = self.clone();
        match event {
            AppEvent::TabSelected(tab) => next.active_tab = tab,
            AppEvent::VoiceToggled => next.voice.enabled = !next.voice.enabled,
            AppEvent::FilterChanged(mode) => next.filter_mode = mode,
            AppEvent::SearchChanged(term) => next.search_term = term,
            AppEvent::CategorySelected(category) => next.selected_category = category,
            AppEvent::ListeningLevelChanged(level) => {
                next.voice.listening_level = clamp_percent(level)
            }
            AppEvent::OutputVolumeChanged(volume) => {
                next.voice.output_volume = clamp_percent(volume)
            }
            AppEvent::ResponseDelayChanged(secs) => next.voice.response_delay_secs = secs,
        }
        next
    }
}
