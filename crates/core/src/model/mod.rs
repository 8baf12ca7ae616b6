mod ids;
mod question;
mod report;
mod session;
mod topic;

pub use ids::{ParseIdError, QuestionId, SessionKey};

pub use question::{Question, QuestionBank, QuestionError};
pub use report::{PerformanceBand, QuestionOutcome, ResultReport, TopicFeedback};
pub use session::{QuizSession, SessionState};
pub use topic::{TopicWeight, TopicWeightError, TopicWeights};
