//! 定期受信サービス
//!
//! 一定間隔でメッセージ生成器を呼び、共有ストアを丸ごと差し替える。
//! - 発火はひとつのタスク内で直列に処理される
//! - `stop()`またはサービスのドロップでそれ以降の発火を止める
//! - 生成したメッセージはbroadcastで購読者に通知

use crate::chat_management::{ChatMessage, MessageStore};
use crate::error::{CohostError, CohostResult};
use crate::simulation::MessageGenerator;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// 受信間隔の既定値
pub const DEFAULT_INGESTION_INTERVAL: Duration = Duration::from_secs(5);

/// 通知チャネルの容量
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 複数の読み手が参照するメッセージストア
pub type SharedMessageStore = Arc<RwLock<MessageStore>>;

pub fn shared_store(store: MessageStore) -> SharedMessageStore {
    Arc::new(RwLock::new(store))
}

/// 受信統計
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionStats {
    /// 発火回数
    pub firings: u64,
    pub started_at: DateTime<Utc>,
    pub last_fired_at: Option<DateTime<Utc>>,
}

impl IngestionStats {
    fn new() -> Self {
        Self {
            firings: 0,
            started_at: Utc::now(),
            last_fired_at: None,
        }
    }
}

/// 定期受信サービス
#[derive(Debug)]
pub struct IngestionService {
    store: SharedMessageStore,
    stats: Arc<Mutex<IngestionStats>>,
    events: broadcast::Sender<ChatMessage>,
    cancel_sender: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl IngestionService {
    /// 受信ループを開始
    ///
    /// 最初の発火は`interval`経過後。tokioランタイム外から呼ぶとエラー。
    pub fn start<R>(
        store: SharedMessageStore,
        generator: MessageGenerator<R>,
        interval: Duration,
    ) -> CohostResult<Self>
    where
        R: Rng + Send + 'static,
    {
        if interval.is_zero() {
            return Err(CohostError::Ingestion(
                "interval must be greater than zero".to_string(),
            ));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CohostError::Ingestion(format!("tokio runtime not available: {}", e)))?;

        let stats = Arc::new(Mutex::new(IngestionStats::new()));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (cancel_sender, cancel_receiver) = oneshot::channel();

        let handle = runtime.spawn(Self::run_loop(
            Arc::clone(&store),
            generator,
            interval,
            Arc::clone(&stats),
            events.clone(),
            cancel_receiver,
        ));

        tracing::info!("🚀 チャット受信シミュレーションを開始 (間隔: {:?})", interval);

        Ok(Self {
            store,
            stats,
            events,
            cancel_sender: Some(cancel_sender),
            handle: Some(handle),
            interval,
        })
    }

    async fn run_loop<R: Rng>(
        store: SharedMessageStore,
        mut generator: MessageGenerator<R>,
        interval: Duration,
        stats: Arc<Mutex<IngestionStats>>,
        events: broadcast::Sender<ChatMessage>,
        mut cancel_receiver: oneshot::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // 送信側のドロップでも解決する
                _ = &mut cancel_receiver => break,
                _ = ticker.tick() => {
                    let now = Utc::now();
                    let message = {
                        let mut guard = store.write();
                        let (next, message) = generator.ingest(&guard, now);
                        *guard = next;
                        message
                    };

                    let firings = {
                        let mut stats = stats.lock();
                        stats.firings += 1;
                        stats.last_fired_at = Some(now);
                        stats.firings
                    };

                    tracing::debug!(
                        firing = firings,
                        id = %message.id,
                        platform = %message.platform,
                        is_question = message.is_question,
                        "📨 Simulated chat message ingested"
                    );

                    // 購読者がいなくても問題ない
                    let _ = events.send(message);
                }
            }
        }

        tracing::info!("🏁 チャット受信シミュレーションを停止");
    }

    /// 新しく受信したメッセージの購読
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.events.subscribe()
    }

    /// 現在のストアのスナップショット
    pub fn snapshot(&self) -> MessageStore {
        self.store.read().clone()
    }

    pub fn store(&self) -> SharedMessageStore {
        Arc::clone(&self.store)
    }

    pub fn stats(&self) -> IngestionStats {
        self.stats.lock().clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// 以降の発火を止める
    pub fn stop(&mut self) {
        if let Some(sender) = self.cancel_sender.take() {
            let _ = sender.send(());
            tracing::debug!("🛑 受信停止を要求");
        }
    }

    /// 停止してループの終了を待つ
    pub async fn shutdown(mut self) -> CohostResult<IngestionStats> {
        self.stop();
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| CohostError::Ingestion(format!("ingestion task failed: {}", e)))?;
        }
        Ok(self.stats())
    }
}

impl Drop for IngestionService {
    fn drop(&mut self) {
        self.stop();
    }
}
