pub mod chat_management;
pub mod dashboard;
pub mod error;
pub mod simulation;
pub mod utils;

// Re-export the main error types for convenience
pub use error::{CohostError, CohostResult};

// Re-export the triage model
pub use chat_management::{
    filter_messages, format_time_ago, format_wait_time, mark_answered, rank_messages,
    search_responses, AnswerBank, ChatMessage, ChatPriority, FilterMode, MessageId, MessageStore,
    Platform, PriorityMessage, QueuePriority, StoredResponse,
};

// Re-export simulation entry points
pub use simulation::{IngestionService, MessageGenerator};

pub use dashboard::{AppEvent, DashboardState};
