//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリを使用した設定ファイルの永続化と管理を提供します。

use super::VoiceSettings;
use crate::chat_management::{FilterMode, DEFAULT_STORE_CAPACITY};
use crate::simulation::DEFAULT_QUESTION_PROBABILITY;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// 受信シミュレーション設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub interval_secs: u64,
    pub store_capacity: usize,
    pub question_probability: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            store_capacity: DEFAULT_STORE_CAPACITY,
            question_probability: DEFAULT_QUESTION_PROBABILITY,
        }
    }
}

impl IngestionConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// チャットフィード設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub default_filter: FilterMode,
}

/// ログ設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// JSON形式で出力
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ingestion: IngestionConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub voice: VoiceSettings,

    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 範囲外の値を既定値または上下限に丸める
    pub fn sanitized(mut self) -> Self {
        if self.ingestion.interval_secs == 0 {
            warn!("⚠️ interval_secs=0 は無効なため既定値を使用");
            self.ingestion.interval_secs = IngestionConfig::default().interval_secs;
        }
        if self.ingestion.store_capacity == 0 {
            warn!("⚠️ store_capacity=0 は無効なため既定値を使用");
            self.ingestion.store_capacity = DEFAULT_STORE_CAPACITY;
        } else if self.ingestion.store_capacity > DEFAULT_STORE_CAPACITY {
            warn!(
                "⚠️ store_capacity={} は上限を超えるため{}に丸めます",
                self.ingestion.store_capacity, DEFAULT_STORE_CAPACITY
            );
            self.ingestion.store_capacity = DEFAULT_STORE_CAPACITY;
        }
        let probability = self.ingestion.question_probability;
        if !(0.0..=1.0).contains(&probability) {
            warn!("⚠️ question_probability={} は範囲外のため既定値を使用", probability);
            self.ingestion.question_probability = DEFAULT_QUESTION_PROBABILITY;
        }
        if self.voice.listening_level > 100 || self.voice.output_volume > 100 {
            warn!("⚠️ 音声レベルが100を超えているため丸めます");
            self.voice = self.voice.sanitized();
        }
        self
    }
}

/// 設定管理マネージャー
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDG設定ディレクトリを使う設定マネージャーを作成
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::with_path(config_path)
    }

    /// 任意のパスを使う設定マネージャーを作成
    pub fn with_path(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        // 設定ディレクトリを作成（存在しない場合）
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self { config_path })
    }

    /// XDGディレクトリに基づく設定ファイルパスを取得
    fn get_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("dev", "cohost", "cohost")
            .context("Failed to get project directories")?;

        let config_file = project_dirs.config_dir().join("config.toml");

        debug!("Config file path: {}", config_file.display());

        Ok(config_file)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 設定を読み込み
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, using default settings: {}",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let config_content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config: AppConfig = toml::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        info!(
            "✅ Configuration loaded from: {}",
            self.config_path.display()
        );

        Ok(config.sanitized())
    }

    /// 設定を保存
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let config_content =
            toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, config_content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        info!("💾 Configuration saved to: {}", self.config_path.display());

        Ok(())
    }
}
