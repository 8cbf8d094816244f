//! 回答バンク
//!
//! よくある質問とその定型回答を保持し、部分一致検索とカテゴリ絞り込みを提供する。
//! 信頼度・使用回数はプレースホルダ値としてそのまま扱う。

use super::MessageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// すべてのカテゴリを表す予約値
pub const ALL_CATEGORIES: &str = "all";

/// 信頼度の上限（パーセント）
pub const MAX_CONFIDENCE: u8 = 100;

/// 保存済みの定型回答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredResponse {
    pub id: MessageId,
    pub question: String,
    pub answer: String,
    pub category: String,
    /// 0〜100。読み込み時に上限へ丸める
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    pub usage_count: u32,
    pub last_used: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl StoredResponse {
    /// 質問文または回答文に大文字小文字を無視して含まれるか
    pub fn contains_text(&self, lowercased_text: &str) -> bool {
        self.question.to_lowercase().contains(lowercased_text)
            || self.answer.to_lowercase().contains(lowercased_text)
    }

    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category == category
    }

    /// 表示用の信頼度（100を超える値は100）
    pub fn confidence_percent(&self) -> u8 {
        self.confidence.min(MAX_CONFIDENCE)
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let confidence = u8::deserialize(deserializer)?;
    Ok(confidence.min(MAX_CONFIDENCE))
}

/// 回答バンク検索
///
/// カテゴリが一致（`"all"`なら常に一致）し、かつ検索語が空か
/// 質問・回答のどちらかに部分一致するものを入力順で返す。
pub fn search_responses(
    responses: &[StoredResponse],
    text: &str,
    category: &str,
) -> Vec<StoredResponse> {
    let needle = text.to_lowercase();
    responses
        .iter()
        .filter(|r| r.in_category(category))
        .filter(|r| needle.is_empty() || r.contains_text(&needle))
        .cloned()
        .collect()
}

/// カテゴリボタンの表示名
pub fn category_label(category: &str) -> String {
    if category == ALL_CATEGORIES {
        return "All".to_string();
    }
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 信頼度の表示区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// 100を超える値は100として扱う
    pub fn from_confidence(confidence: u8) -> Self {
        match confidence.min(MAX_CONFIDENCE) {
            90..=MAX_CONFIDENCE => ConfidenceLevel::High,
            70..=89 => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}

/// 最終使用時刻からの経過を表示用文字列に変換
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// 定型回答のコレクション
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerBank {
    responses: Vec<StoredResponse>,
}

impl AnswerBank {
    pub fn new(responses: Vec<StoredResponse>) -> Self {
        Self { responses }
    }

    pub fn responses(&self) -> &[StoredResponse] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn search(&self, text: &str, category: &str) -> Vec<StoredResponse> {
        search_responses(&self.responses, text, category)
    }

    /// `"all"`と、出現順に重複を除いたカテゴリ一覧
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for response in &self.responses {
            if !categories.contains(&response.category) {
                categories.push(response.category.clone());
            }
        }
        categories
    }

    /// 「N responses stored」バッジ
    pub fn badge(&self) -> String {
        format!("{} responses stored", self.responses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_response(id: &str, question: &str, answer: &str, category: &str) -> StoredResponse {
        let now = Utc::now();
        StoredResponse {
            id: MessageId::new(id),
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
            confidence: 90,
            usage_count: 0,
            last_used: now,
            created_at: now,
        }
    }

    fn bank() -> AnswerBank {
        AnswerBank::new(vec![
            create_response("1", "Which mic?", "A dynamic microphone", "equipment"),
            create_response("2", "Favourite game?", "Anything indie", "games"),
            create_response("3", "Which camera?", "A webcam", "equipment"),
        ])
    }

    fn ids(responses: &[StoredResponse]) -> Vec<&str> {
        responses.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert_eq!(ids(&bank().search("MICROPHONE", ALL_CATEGORIES)), vec!["1"]);
        assert_eq!(ids(&bank().search("which", ALL_CATEGORIES)), vec!["1", "3"]);
    }

    #[test]
    fn test_empty_text_matches_everything_in_category() {
        assert_eq!(ids(&bank().search("", "equipment")), vec!["1", "3"]);
        assert_eq!(bank().search("", ALL_CATEGORIES).len(), 3);
    }

    #[test]
    fn test_text_and_category_combine() {
        assert!(bank().search("indie", "equipment").is_empty());
        assert_eq!(ids(&bank().search("indie", "games")), vec!["2"]);
    }

    #[test]
    fn test_unknown_category_yields_empty() {
        assert!(bank().search("", "cooking").is_empty());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        assert_eq!(bank().categories(), vec!["all", "equipment", "games"]);
        assert_eq!(AnswerBank::default().categories(), vec!["all"]);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("all"), "All");
        assert_eq!(category_label("equipment"), "Equipment");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn test_confidence_level_boundaries() {
        assert_eq!(ConfidenceLevel::from_confidence(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(90), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_confidence(89), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(70), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_confidence(69), ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_is_capped_at_100() {
        let mut response = create_response("1", "Q", "A", "equipment");
        response.confidence = 250;
        assert_eq!(response.confidence_percent(), 100);
        assert_eq!(response.confidence_level(), ConfidenceLevel::High);

        let mut json = serde_json::to_value(&response).unwrap();
        json["confidence"] = serde_json::json!(180);
        let restored: StoredResponse = serde_json::from_value(json).unwrap();
        assert_eq!(restored.confidence, 100);
    }

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(now - Duration::minutes(30), now), "Just now");
        assert_eq!(format_time_ago(now - Duration::hours(2), now), "2h ago");
        assert_eq!(format_time_ago(now - Duration::hours(23), now), "23h ago");
        assert_eq!(format_time_ago(now - Duration::days(7), now), "7d ago");
    }

    #[test]
    fn test_badge() {
        assert_eq!(bank().badge(), "3 responses stored");
    }
}
