// ログ関連ユーティリティ

use crate::chat_management::ChatMessage;
use crate::dashboard::config_manager::LogConfig;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 環境変数`RUST_LOG`を優先し、なければ設定のレベルを使うフィルター
fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// ログ初期化
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(build_env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        );

    subscriber.try_init()?;

    Ok(())
}

/// JSON形式のログ初期化
pub fn init_json_logging(default_level: &str) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(build_env_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        );

    subscriber.try_init()?;

    Ok(())
}

/// 設定に従ってログを初期化
pub fn init_logging_from_config(config: &LogConfig) -> anyhow::Result<()> {
    if config.json {
        init_json_logging(&config.log_level)
    } else {
        init_logging(&config.log_level)
    }
}

/// デバッグ用のメッセージダンプ
pub fn dump_chat_message(message: &ChatMessage, context: &str) {
    debug!(
        context = context,
        id = %message.id,
        username = %message.username,
        platform = %message.platform,
        priority = %message.priority,
        is_question = message.is_question,
        answered = message.answered,
        content_preview = %message.message.chars().take(50).collect::<String>(),
        "📨 Chat message"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_uses_configured_level() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(build_env_filter("debug").to_string(), "debug");
        }
    }
}
