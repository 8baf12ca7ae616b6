use std::sync::Arc;

use quiz_core::model::{
    PerformanceBand, Question, QuestionBank, QuestionId, QuizSession, SessionKey, TopicWeights,
};
use quiz_core::{InvalidSessionReason, QuizError, QuizSettings};
use services::{QuizService, Step};
use storage::repository::{InMemorySessionStore, SessionStore};

fn question(topic: &str, n: usize) -> Question {
    Question::new(
        topic,
        format!("{topic} question {n}"),
        vec!["Bullish".into(), "Bearish".into(), "Neutral".into()],
        "Bullish",
        Some(format!("Explanation {n}")),
        None,
    )
    .unwrap()
}

fn curriculum_bank(per_topic: usize) -> QuestionBank {
    let weights = TopicWeights::curriculum();
    let questions = weights
        .names()
        .flat_map(|topic| (0..per_topic).map(move |n| question(topic, n)))
        .collect();
    QuestionBank::new(questions)
}

#[tokio::test]
async fn full_curriculum_attempt_scores_every_question() {
    let store = InMemorySessionStore::new();
    let svc = QuizService::new(
        Arc::new(curriculum_bank(10)),
        Arc::new(TopicWeights::curriculum()),
        QuizSettings::default(),
        Arc::new(store.clone()),
    )
    .with_seed(2024);
    let key = SessionKey::generate();
    let topics: Vec<String> = svc.weights().names().map(str::to_owned).collect();

    let first = svc.start(key, &topics).await.unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(first.total, 60);

    let mut index = 0;
    loop {
        let view = svc.current(key).await.unwrap();
        assert_eq!(view.index, index);
        let answer = view.question.answer().to_owned();
        match svc.submit(key, index, Some(answer.as_str())).await.unwrap() {
            Step::Next(next) => index = next,
            Step::Completed => break,
        }
    }

    let report = svc.result(key).await.unwrap();
    assert_eq!(report.score(), 60);
    assert_eq!(report.total(), 60);
    assert_eq!(report.feedback().len(), 16);
    assert!(
        report
            .feedback()
            .iter()
            .all(|f| f.band == PerformanceBand::Strong)
    );

    let stored = store.load(key).await.unwrap().expect("session kept");
    assert_eq!(stored.answers().len(), 60);
}

#[tokio::test]
async fn one_right_one_wrong_on_a_topic_is_average() {
    let bank = QuestionBank::new(vec![question("Risk & Return", 0), question("Risk & Return", 1)]);
    let weights = TopicWeights::new([
        ("Risk & Return", 10),
        ("Case Studies", 1),
        ("Psychology of Investing", 1),
    ])
    .unwrap();
    let svc = QuizService::new(
        Arc::new(bank),
        Arc::new(weights),
        QuizSettings::with_question_limit(2).unwrap(),
        Arc::new(InMemorySessionStore::new()),
    )
    .with_seed(5);
    let key = SessionKey::generate();

    svc.start(key, &["Risk & Return", "Case Studies", "Psychology of Investing"])
        .await
        .unwrap();
    assert_eq!(svc.progress(key).await.unwrap().total, 2);

    assert_eq!(svc.submit(key, 0, Some("Bullish")).await.unwrap(), Step::Next(1));
    assert_eq!(svc.submit(key, 1, Some("Bearish")).await.unwrap(), Step::Completed);

    let report = svc.result(key).await.unwrap();
    assert_eq!(report.score(), 1);
    let feedback = report.feedback_for("Risk & Return").unwrap();
    assert_eq!(feedback.band, PerformanceBand::Average);
    assert!((feedback.accuracy() - 0.5).abs() < f64::EPSILON);
    assert_eq!(feedback.message(), "You are average in Risk & Return.");
}

#[tokio::test]
async fn back_navigation_reanswers_in_place() {
    let svc = QuizService::new(
        Arc::new(curriculum_bank(3)),
        Arc::new(TopicWeights::curriculum()),
        QuizSettings::with_question_limit(5).unwrap(),
        Arc::new(InMemorySessionStore::new()),
    )
    .with_seed(9);
    let key = SessionKey::generate();
    svc.start(
        key,
        &["Technical Analysis", "Fundamental Analysis", "Case Studies"],
    )
    .await
    .unwrap();

    svc.submit(key, 0, None).await.unwrap();
    svc.submit(key, 1, Some("Bearish")).await.unwrap();

    let first = svc.question(key, 0).await.unwrap();
    let answer = first.question.answer().to_owned();
    assert_eq!(svc.submit(key, 0, Some(answer.as_str())).await.unwrap(), Step::Next(1));

    let progress = svc.progress(key).await.unwrap();
    assert_eq!(progress.answered, 2);
    assert_eq!(svc.current(key).await.unwrap().index, 2);

    let err = svc.submit(key, 4, Some("Bullish")).await.unwrap_err();
    assert!(matches!(
        err.as_quiz(),
        Some(QuizError::InvalidSession(InvalidSessionReason::AheadOfCursor { index: 4, cursor: 2 }))
    ));
}

#[tokio::test]
async fn empty_pool_is_reported_before_any_session_exists() {
    let svc = QuizService::new(
        Arc::new(curriculum_bank(0)),
        Arc::new(TopicWeights::curriculum()),
        QuizSettings::default(),
        Arc::new(InMemorySessionStore::new()),
    );
    let key = SessionKey::generate();
    let err = svc
        .start(key, &["Case Studies", "Risk & Return", "Corporate Actions"])
        .await
        .unwrap_err();
    assert_eq!(err.as_quiz(), Some(&QuizError::EmptyPool));
    assert_eq!(err.user_message(), "No questions found for selected topics.");
    assert!(svc.progress(key).await.is_err());
}

#[tokio::test]
async fn corrupted_session_redirects_instead_of_panicking() {
    let store = InMemorySessionStore::new();
    let svc = QuizService::new(
        Arc::new(curriculum_bank(1)),
        Arc::new(TopicWeights::curriculum()),
        QuizSettings::default(),
        Arc::new(store.clone()),
    );
    let key = SessionKey::generate();
    store
        .save(key, &QuizSession::new(vec![QuestionId::new(999)]))
        .await
        .unwrap();

    let err = svc.current(key).await.unwrap_err();
    assert!(err.as_quiz().is_some_and(QuizError::requires_reselection));
    assert!(matches!(
        svc.question(key, 3).await.unwrap_err().as_quiz(),
        Some(QuizError::InvalidSession(InvalidSessionReason::OutOfRange { index: 3, total: 1 }))
    ));
}
