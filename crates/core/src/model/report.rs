use serde::Serialize;
use std::fmt;

/// Performance band derived from per-topic accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    /// Accuracy of at least 80%.
    Strong,
    /// Accuracy from 50% up to (not including) 80%.
    Average,
    /// Accuracy below 50%.
    Weak,
}

impl PerformanceBand {
    /// Classify `correct` out of `total`.
    ///
    /// Thresholds are compared in integer arithmetic so that boundary cases such as
    /// 4/5 and 1/2 land exactly on their band. A topic with `total == 0` is `Weak`.
    #[must_use]
    pub fn classify(correct: u32, total: u32) -> Self {
        let (correct, total) = (u64::from(correct), u64::from(total));
        if total > 0 && correct * 5 >= total * 4 {
            Self::Strong
        } else if total > 0 && correct * 2 >= total {
            Self::Average
        } else {
            Self::Weak
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Strong => "strong",
            Self::Average => "average",
            Self::Weak => "weak",
        };
        f.write_str(label)
    }
}

/// One answered question in a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub selected: String,
    pub is_correct: bool,
    pub explanation: String,
    pub example: String,
    pub main_topic: String,
}

/// Per-topic tally with its band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicFeedback {
    pub topic: String,
    pub correct: u32,
    pub total: u32,
    pub band: PerformanceBand,
}

impl TopicFeedback {
    #[must_use]
    pub fn new(topic: impl Into<String>, correct: u32, total: u32) -> Self {
        Self {
            topic: topic.into(),
            correct,
            total,
            band: PerformanceBand::classify(correct, total),
        }
    }

    /// Fraction of correct answers, `0.0` when the topic has no questions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total)
    }

    /// Human-readable feedback line for this topic.
    #[must_use]
    pub fn message(&self) -> String {
        match self.band {
            PerformanceBand::Strong => format!("You performed well in {}.", self.topic),
            PerformanceBand::Average => format!("You are average in {}.", self.topic),
            PerformanceBand::Weak => {
                format!("You are weak in {}. Focus on this area.", self.topic)
            }
        }
    }
}

/// Final, immutable result of a completed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultReport {
    score: u32,
    outcomes: Vec<QuestionOutcome>,
    feedback: Vec<TopicFeedback>,
}

impl ResultReport {
    pub(crate) fn new(
        score: u32,
        outcomes: Vec<QuestionOutcome>,
        feedback: Vec<TopicFeedback>,
    ) -> Self {
        Self {
            score,
            outcomes,
            feedback,
        }
    }

    /// Number of correctly answered questions.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of questions in the attempt.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    /// Topic feedback in the order topics first appeared in the attempt.
    #[must_use]
    pub fn feedback(&self) -> &[TopicFeedback] {
        &self.feedback
    }

    #[must_use]
    pub fn feedback_for(&self, topic: &str) -> Option<&TopicFeedback> {
        self.feedback.iter().find(|f| f.topic == topic)
    }
}
