use rand::Rng;
use rand::seq::{SliceRandom, index};

use quiz_core::model::{QuestionBank, QuestionId};
use quiz_core::{Allocation, QuizError};

/// Draw the allocated number of questions per topic and shuffle them together.
///
/// Each topic contributes `min(count, available)` distinct questions, chosen
/// uniformly at random. A topic with fewer questions than requested simply
/// contributes all it has. The combined list is then shuffled so that topics are
/// interleaved.
///
/// # Errors
///
/// Returns `QuizError::EmptyPool` when nothing could be drawn, i.e. none of the
/// allocated topics has any questions.
pub fn sample<R: Rng + ?Sized>(
    allocation: &Allocation,
    bank: &QuestionBank,
    rng: &mut R,
) -> Result<Vec<QuestionId>, QuizError> {
    let mut sequence = Vec::with_capacity(allocation.total());

    for (topic, requested) in allocation.iter() {
        let pool = bank.ids_for_topic(topic);
        let take = requested.min(pool.len());
        if take < requested {
            tracing::debug!(
                topic,
                requested,
                available = pool.len(),
                "topic has fewer questions than allocated"
            );
        }
        sequence.extend(index::sample(rng, pool.len(), take).into_iter().map(|i| pool[i]));
    }

    if sequence.is_empty() {
        return Err(QuizError::EmptyPool);
    }

    sequence.shuffle(rng);
    Ok(sequence)
}
