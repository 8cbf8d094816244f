//! エラー型定義
//!
//! フィルター・並び替え・検索といったドメイン操作は全域関数なのでエラーを返さない。
//! ここで扱うのは列挙値の解釈とシミュレーション実行の失敗のみ。
//! 設定ファイルの読み書きは`anyhow`で文脈を付けて扱う。

use thiserror::Error;

/// cohost全体のエラー
#[derive(Error, Debug)]
pub enum CohostError {
    #[error("値を解釈できません: {0}")]
    Parse(String),

    #[error("チャット受信シミュレーションエラー: {0}")]
    Ingestion(String),
}

impl CohostError {
    /// 不明な列挙値の解釈失敗
    pub fn unknown_value(kind: &str, value: &str) -> Self {
        CohostError::Parse(format!("unknown {}: {}", kind, value))
    }
}

pub type CohostResult<T> = Result<T, CohostError>;
