use crate::error::{InvalidSessionReason, QuizError};
use crate::model::{QuestionBank, QuestionId, QuestionOutcome, ResultReport, TopicFeedback};

/// Score a finished attempt.
///
/// Answers are compared to the canonical answer by exact string equality. Case and
/// whitespace differences count as wrong.
///
/// # Errors
///
/// Returns `QuizError::InvalidSession` for an empty sequence or a question id the
/// bank does not hold, and `QuizError::IncompleteAttempt` when the number of answers
/// differs from the number of questions. No partial report is produced.
pub fn score(
    question_sequence: &[QuestionId],
    answers: &[String],
    bank: &QuestionBank,
) -> Result<ResultReport, QuizError> {
    if question_sequence.is_empty() {
        return Err(QuizError::InvalidSession(InvalidSessionReason::Empty));
    }
    if answers.len() != question_sequence.len() {
        return Err(QuizError::IncompleteAttempt {
            answered: answers.len(),
            total: question_sequence.len(),
        });
    }

    let mut score = 0_u32;
    let mut outcomes = Vec::with_capacity(question_sequence.len());
    // (topic, correct, total) in first-seen order
    let mut tallies: Vec<(&str, u32, u32)> = Vec::new();

    for (id, selected) in question_sequence.iter().zip(answers) {
        let question = bank
            .get(*id)
            .ok_or(QuizError::InvalidSession(InvalidSessionReason::UnknownQuestion {
                index: id.index(),
            }))?;
        let is_correct = selected == question.answer();
        if is_correct {
            score = score.saturating_add(1);
        }

        let topic = question.main_topic();
        let pos = match tallies.iter().position(|(t, _, _)| *t == topic) {
            Some(pos) => pos,
            None => {
                tallies.push((topic, 0, 0));
                tallies.len() - 1
            }
        };
        let tally = &mut tallies[pos];
        tally.2 = tally.2.saturating_add(1);
        if is_correct {
            tally.1 = tally.1.saturating_add(1);
        }

        outcomes.push(QuestionOutcome {
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            correct_answer: question.answer().to_owned(),
            selected: selected.clone(),
            is_correct,
            explanation: question.explanation_or_default().to_owned(),
            example: question.example_or_default().to_owned(),
            main_topic: topic.to_owned(),
        });
    }

    let feedback = tallies
        .into_iter()
        .map(|(topic, correct, total)| TopicFeedback::new(topic, correct, total))
        .collect();

    Ok(ResultReport::new(score, outcomes, feedback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PerformanceBand, Question};

    fn question(topic: &str, answer: &str) -> Question {
        Question::new(
            topic,
            format!("{topic}?"),
            vec!["Buy".into(), "Sell".into(), "Hold".into()],
            answer,
            Some("because".into()),
            None,
        )
        .unwrap()
    }

    fn answers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn ids(items: &[usize]) -> Vec<QuestionId> {
        items.iter().copied().map(QuestionId::new).collect()
    }

    #[test]
    fn half_right_on_one_topic_is_average() {
        let bank = QuestionBank::new(vec![question("Risk", "Buy"), question("Risk", "Sell")]);
        let report = score(&ids(&[0, 1]), &answers(&["Buy", "Buy"]), &bank).unwrap();

        assert_eq!(report.score(), 1);
        assert_eq!(report.total(), 2);
        let feedback = report.feedback_for("Risk").unwrap();
        assert_eq!((feedback.correct, feedback.total), (1, 2));
        assert_eq!(feedback.band, PerformanceBand::Average);
        assert_eq!(feedback.message(), "You are average in Risk.");
    }

    #[test]
    fn comparison_is_exact_match_only() {
        // Verified as-is: no case or whitespace normalisation.
        let bank = QuestionBank::new(vec![question("A", "Hold"), question("A", "Hold")]);
        let report = score(&ids(&[0, 1]), &answers(&["hold", "Hold "]), &bank).unwrap();
        assert_eq!(report.score(), 0);
        assert!(report.outcomes().iter().all(|o| !o.is_correct));
    }

    #[test]
    fn feedback_follows_first_appearance() {
        let bank = QuestionBank::new(vec![
            question("A", "Buy"),
            question("B", "Buy"),
            question("C", "Buy"),
        ]);
        let report = score(
            &ids(&[2, 0, 2, 1]),
            &answers(&["Buy", "Sell", "Buy", "Not Answered"]),
            &bank,
        )
        .unwrap();

        let topics: Vec<&str> = report.feedback().iter().map(|f| f.topic.as_str()).collect();
        assert_eq!(topics, vec!["C", "A", "B"]);
        assert_eq!(report.feedback()[0].band, PerformanceBand::Strong);
        assert_eq!(report.feedback()[1].band, PerformanceBand::Weak);
        assert_eq!(report.score(), 2);
    }

    #[test]
    fn outcome_carries_question_details() {
        let bank = QuestionBank::new(vec![question("A", "Sell")]);
        let report = score(&ids(&[0]), &answers(&["Buy"]), &bank).unwrap();
        let outcome = &report.outcomes()[0];
        assert_eq!(outcome.correct_answer, "Sell");
        assert_eq!(outcome.selected, "Buy");
        assert_eq!(outcome.explanation, "because");
        assert_eq!(outcome.example, "No example available.");
        assert_eq!(outcome.options.len(), 3);
        assert_eq!(outcome.main_topic, "A");
    }

    #[test]
    fn short_answers_are_incomplete() {
        let bank = QuestionBank::new(vec![question("A", "Buy"), question("A", "Buy")]);
        assert_eq!(
            score(&ids(&[0, 1]), &answers(&["Buy"]), &bank),
            Err(QuizError::IncompleteAttempt {
                answered: 1,
                total: 2
            })
        );
    }

    #[test]
    fn empty_or_stale_sessions_are_invalid() {
        let bank = QuestionBank::new(vec![question("A", "Buy")]);
        assert_eq!(
            score(&[], &[], &bank),
            Err(QuizError::InvalidSession(InvalidSessionReason::Empty))
        );
        assert_eq!(
            score(&ids(&[5]), &answers(&["Buy"]), &bank),
            Err(QuizError::InvalidSession(
                InvalidSessionReason::UnknownQuestion { index: 5 }
            ))
        );
    }
}
