pub mod judge;
pub mod prompts;
pub mod scorer;

pub use judge::{JudgeClient, JudgeConfig, JudgeError, JudgeVerdict};
pub use prompts::JudgePrompt;
pub use scorer::LlmJudgeScorer;
