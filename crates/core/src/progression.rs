//! Sequential question-by-question progression over a `QuizSession`.
//!
//! Reads and writes here are synchronous and only touch the session record they are
//! handed. Persisting the record is the caller's job.

use crate::error::{InvalidSessionReason, QuizError};
use crate::model::{Question, QuestionBank, QuestionId, QuizSession};

/// Answer recorded when the user submits without choosing an option.
pub const NOT_ANSWERED: &str = "Not Answered";

/// A question ready for display, with progress counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionView<'a> {
    pub id: QuestionId,
    pub question: &'a Question,
    /// Zero-based position in the attempt.
    pub index: usize,
    pub total: usize,
}

impl QuestionView<'_> {
    /// One-based position, for "Question 3 of 60" style display.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Where to go after an answer has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show the question at this index next.
    Next(usize),
    /// All questions answered; the attempt can be scored.
    Completed,
}

/// The question at `index`, allowing back-navigation to earlier positions.
///
/// # Errors
///
/// Returns `QuizError::InvalidSession` if the session has no questions, `index` is
/// past the end, or the session refers to a question missing from `bank`.
pub fn question_at<'a>(
    session: &QuizSession,
    bank: &'a QuestionBank,
    index: usize,
) -> Result<QuestionView<'a>, QuizError> {
    let sequence = session.question_sequence();
    if sequence.is_empty() {
        return Err(QuizError::InvalidSession(InvalidSessionReason::Empty));
    }
    let id = *sequence
        .get(index)
        .ok_or(QuizError::InvalidSession(InvalidSessionReason::OutOfRange {
            index,
            total: sequence.len(),
        }))?;
    let question = bank
        .get(id)
        .ok_or(QuizError::InvalidSession(InvalidSessionReason::UnknownQuestion {
            index: id.index(),
        }))?;

    Ok(QuestionView {
        id,
        question,
        index,
        total: sequence.len(),
    })
}

/// The next unanswered question.
///
/// # Errors
///
/// Returns `QuizError::InvalidSession` when there is nothing left to answer or the
/// session is unusable. A completed session should be scored instead.
pub fn current_question<'a>(
    session: &QuizSession,
    bank: &'a QuestionBank,
) -> Result<QuestionView<'a>, QuizError> {
    question_at(session, bank, session.cursor())
}

/// Record `selected` as the answer at `index` and report the next step.
///
/// Answering at the cursor appends; answering an earlier index overwrites it, which
/// is how back-navigation re-answers a question. `None` is stored as
/// [`NOT_ANSWERED`].
///
/// # Errors
///
/// Returns `QuizError::InvalidSession` if the session has no questions, `index` is
/// past the end, or `index` is ahead of the cursor. The session is left unchanged.
pub fn submit_answer(
    session: &mut QuizSession,
    index: usize,
    selected: Option<&str>,
) -> Result<Step, QuizError> {
    let total = session.total();
    if total == 0 {
        return Err(QuizError::InvalidSession(InvalidSessionReason::Empty));
    }
    if index >= total {
        return Err(QuizError::InvalidSession(InvalidSessionReason::OutOfRange {
            index,
            total,
        }));
    }

    let cursor = session.cursor();
    let answer = selected.unwrap_or(NOT_ANSWERED).to_owned();
    let answers = session.answers_mut();
    match cursor.cmp(&index) {
        std::cmp::Ordering::Equal => answers.push(answer),
        std::cmp::Ordering::Greater => answers[index] = answer,
        std::cmp::Ordering::Less => {
            return Err(QuizError::InvalidSession(
                InvalidSessionReason::AheadOfCursor { index, cursor },
            ));
        }
    }

    if index + 1 >= total {
        Ok(Step::Completed)
    } else {
        Ok(Step::Next(index + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QuestionBank {
        let q = |text: &str| {
            Question::new(
                "Topic",
                text,
                vec!["yes".into(), "no".into()],
                "yes",
                None,
                None,
            )
            .unwrap()
        };
        QuestionBank::new(vec![q("zero"), q("one"), q("two")])
    }

    fn session() -> QuizSession {
        QuizSession::new(vec![QuestionId::new(2), QuestionId::new(0), QuestionId::new(1)])
    }

    #[test]
    fn walks_the_sequence_in_order() {
        let bank = bank();
        let mut session = session();

        let view = current_question(&session, &bank).unwrap();
        assert_eq!(view.question.text(), "two");
        assert_eq!((view.number(), view.total), (1, 3));

        assert_eq!(submit_answer(&mut session, 0, Some("yes")), Ok(Step::Next(1)));
        assert_eq!(current_question(&session, &bank).unwrap().question.text(), "zero");

        assert_eq!(submit_answer(&mut session, 1, None), Ok(Step::Next(2)));
        assert_eq!(submit_answer(&mut session, 2, Some("no")), Ok(Step::Completed));
        assert_eq!(session.answers(), ["yes", NOT_ANSWERED, "no"]);
        assert!(session.is_complete());
    }

    #[test]
    fn next_read_after_submit_never_revisits() {
        let bank = bank();
        let mut session = session();
        let first = current_question(&session, &bank).unwrap().id;
        submit_answer(&mut session, 0, Some("yes")).unwrap();
        let second = current_question(&session, &bank).unwrap();
        assert_eq!(second.index, 1);
        assert_ne!(second.id, first);
    }

    #[test]
    fn back_navigation_overwrites_without_moving_cursor() {
        let mut session = session();
        submit_answer(&mut session, 0, Some("yes")).unwrap();
        submit_answer(&mut session, 1, Some("yes")).unwrap();

        assert_eq!(submit_answer(&mut session, 0, Some("no")), Ok(Step::Next(1)));
        assert_eq!(session.answers(), ["no", "yes"]);
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn skipping_ahead_is_rejected_and_leaves_session_untouched() {
        let mut session = session();
        let err = submit_answer(&mut session, 2, Some("yes")).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidSession(InvalidSessionReason::AheadOfCursor { index: 2, cursor: 0 })
        );
        assert!(session.answers().is_empty());
    }

    #[test]
    fn out_of_range_and_empty_sessions_are_invalid() {
        let bank = bank();
        let mut session = session();
        assert!(matches!(
            question_at(&session, &bank, 3),
            Err(QuizError::InvalidSession(InvalidSessionReason::OutOfRange { index: 3, total: 3 }))
        ));
        assert!(matches!(
            submit_answer(&mut session, 9, Some("yes")),
            Err(QuizError::InvalidSession(InvalidSessionReason::OutOfRange { .. }))
        ));

        let mut empty = QuizSession::default();
        assert_eq!(
            current_question(&empty, &bank).unwrap_err(),
            QuizError::InvalidSession(InvalidSessionReason::Empty)
        );
        assert_eq!(
            submit_answer(&mut empty, 0, None).unwrap_err(),
            QuizError::InvalidSession(InvalidSessionReason::Empty)
        );
    }

    #[test]
    fn completed_session_has_no_current_question() {
        let bank = bank();
        let session = QuizSession::from_parts(vec![QuestionId::new(0)], vec!["yes".into()]);
        assert!(matches!(
            current_question(&session, &bank),
            Err(QuizError::InvalidSession(InvalidSessionReason::OutOfRange { .. }))
        ));
        // earlier positions stay reviewable
        assert!(question_at(&session, &bank, 0).is_ok());
    }

    #[test]
    fn stale_question_id_is_invalid() {
        let bank = bank();
        let session = QuizSession::new(vec![QuestionId::new(40)]);
        assert_eq!(
            current_question(&session, &bank).unwrap_err(),
            QuizError::InvalidSession(InvalidSessionReason::UnknownQuestion { index: 40 })
        );
    }
}
