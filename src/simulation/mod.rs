//! チャット受信シミュレーション
//!
//! 実際の配信プラットフォームには接続せず、乱数でチャットを生成してストアに流し込む。

pub mod ingestion_service;
pub mod message_generator;
pub mod sample_data;

pub use ingestion_service::{
    shared_store, IngestionService, IngestionStats, SharedMessageStore,
    DEFAULT_INGESTION_INTERVAL,
};
pub use message_generator::{MessageGenerator, DEFAULT_QUESTION_PROBABILITY, SIMULATED_PHRASES};
pub use sample_data::*;
