use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cohost::chat_management::{
    category_label, filter_messages, format_time_ago, rank_messages, AnswerBank, ChatMessage,
    FilterMode, MessageId, MessageStore, PriorityMessage, QueueSummary, StoredResponse,
};
use cohost::dashboard::config_manager::{AppConfig, ConfigManager};
use cohost::dashboard::{AppEvent, DashboardState};
use cohost::simulation::{
    sample_answer_bank, sample_chat_messages, sample_priority_messages, shared_store,
    IngestionService, MessageGenerator,
};
use cohost::utils;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

#[derive(Parser)]
#[command(name = "cohost", about = "Livestream co-host triage dashboard (simulated chat)")]
struct Cli {
    /// Number of simulated ingestion firings before rendering.
    #[arg(long, default_value_t = 3)]
    ticks: u32,

    /// Ingestion interval in milliseconds (default: from config).
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Seed for the chat generator; omitted means OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Feed filter: all, questions or unanswered (default: from config).
    #[arg(long)]
    filter: Option<FilterMode>,

    /// Mark a message as answered before rendering (repeatable).
    #[arg(long = "answer")]
    answers: Vec<String>,

    /// Answer bank search text.
    #[arg(long, default_value = "")]
    search: String,

    /// Answer bank category ("all" for every category).
    #[arg(long, default_value = "all")]
    category: String,

    /// Print the views as JSON.
    #[arg(long)]
    json: bool,

    /// Explicit config file path.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ログ初期化前に設定を読むので、警告は初期化後に出す
    let (config, config_error) = match load_config(cli.config.as_ref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    utils::init_logging_from_config(&config.log)?;

    if let Some(e) = config_error {
        tracing::warn!("設定読み込みエラー、デフォルト設定を使用: {:#}", e);
    }

    tracing::info!("🎬 Starting cohost - livestream co-host dashboard");

    let mut state = DashboardState::from_config(&config)
        .apply(AppEvent::SearchChanged(cli.search.clone()))
        .apply(AppEvent::CategorySelected(cli.category.clone()));
    if let Some(mode) = cli.filter {
        state = state.apply(AppEvent::FilterChanged(mode));
    }

    let store = run_simulation(&cli, &config).await?;
    let store = cli
        .answers
        .iter()
        .fold(store, |store, id| store.mark_answered(&MessageId::new(id.as_str())));

    let queue = rank_messages(&sample_priority_messages());
    let bank = sample_answer_bank(Utc::now());

    if cli.json {
        print_json(&state, &store, &queue, &bank)?;
    } else {
        print_feed(&state, &store);
        print_queue(&queue);
        print_answer_bank(&state, &bank);
    }

    tracing::info!("👋 cohost shutting down");
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    manager.load_config()
}

/// サンプルデータから始めて、指定回数だけ受信を発火させる
async fn run_simulation(cli: &Cli, config: &AppConfig) -> Result<MessageStore> {
    let now = Utc::now();
    let store = shared_store(MessageStore::from_messages(
        sample_chat_messages(now),
        config.ingestion.store_capacity,
    ));

    if cli.ticks == 0 {
        return Ok(store.read().clone());
    }

    let generator = match cli.seed {
        Some(seed) => MessageGenerator::seeded(seed),
        None => MessageGenerator::from_entropy(),
    }
    .with_question_probability(config.ingestion.question_probability);

    let interval = cli
        .interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.ingestion.interval());

    let service = IngestionService::start(store, generator, interval)
        .context("Failed to start ingestion")?;
    let mut events = service.subscribe();

    let mut received = 0;
    while received < cli.ticks {
        tokio::select! {
            result = events.recv() => match result {
                Ok(message) => {
                    received += 1;
                    utils::dump_chat_message(&message, "ingested");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("⚠️ {}件の受信通知を取りこぼしました", skipped);
                    received = add_lagged(received, skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("🛑 終了シグナルを受信しました");
                break;
            }
        }
    }

    let snapshot = service.snapshot();
    let stats = service.shutdown().await?;
    tracing::info!("📊 受信シミュレーション完了: {} 回発火", stats.firings);

    Ok(snapshot)
}

/// 取りこぼした件数も受信済みとして数える
fn add_lagged(received: u32, skipped: u64) -> u32 {
    received.saturating_add(u32::try_from(skipped).unwrap_or(u32::MAX))
}

fn print_feed(state: &DashboardState, store: &MessageStore) {
    let messages = filter_messages(store.messages(), state.filter_mode);

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "💬 Live Chat Feed [{}] ({}/{} messages)",
        state.filter_mode.label(),
        messages.len(),
        store.len()
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for message in &messages {
        println!("{}", format_chat_line(message));
    }
}

fn format_chat_line(message: &ChatMessage) -> String {
    let mut tags = Vec::new();
    if message.is_question {
        tags.push("Question");
    }
    if message.answered {
        tags.push("Answered");
    }

    format!(
        "[{}] {:<8} {:<7} {} ({}): {}{}",
        message.timestamp.format("%H:%M:%S"),
        message.platform,
        message.priority,
        message.username,
        message.id,
        message.message,
        if tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", tags.join(", "))
        }
    )
}

fn print_queue(queue: &[PriorityMessage]) {
    let summary = QueueSummary::from_messages(queue);

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("⏰ Priority Queue ({})", summary.badge());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for message in queue {
        println!(
            "{:<7} {:>9}  {} ({}): {}",
            message.priority.as_str().to_uppercase(),
            message.formatted_wait_time(),
            message.username,
            message.platform,
            message.message
        );
        if message.has_similar_answered() {
            println!(
                "        {} similar question(s) already answered",
                message.similar_answered
            );
        }
        if message.needs_attention() {
            println!("        ⚠️ Urgent - Long wait time");
        }
    }
}

fn print_answer_bank(state: &DashboardState, bank: &AnswerBank) {
    let results = bank.search(&state.search_term, &state.selected_category);
    let categories: Vec<String> = bank.categories().iter().map(|c| category_label(c)).collect();

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🧠 Memory Bank ({})", bank.badge());
    println!("   Categories: {}", categories.join(" | "));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let now = Utc::now();
    for response in &results {
        println!("{}", format_response(response, now));
    }
    if results.is_empty() {
        println!("(no matching responses)");
    }
}

fn format_response(response: &StoredResponse, now: chrono::DateTime<Utc>) -> String {
    format!(
        "Q: {} [{}]\nA: {}\n   {}% confidence ({:?}) · Used {} times · Last used {}",
        response.question,
        response.category,
        response.answer,
        response.confidence_percent(),
        response.confidence_level(),
        response.usage_count,
        format_time_ago(response.last_used, now)
    )
}

fn print_json(
    state: &DashboardState,
    store: &MessageStore,
    queue: &[PriorityMessage],
    bank: &AnswerBank,
) -> Result<()> {
    let output = serde_json::json!({
        "state": state,
        "feed": filter_messages(store.messages(), state.filter_mode),
        "queue": {
            "summary": QueueSummary::from_messages(queue),
            "messages": queue,
        },
        "answerBank": {
            "categories": bank.categories(),
            "results": bank.search(&state.search_term, &state.selected_category),
        },
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize output")?
    );
    Ok(())
}
