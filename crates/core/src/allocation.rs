use std::cmp::Reverse;

use crate::error::ConfigurationError;
use crate::model::TopicWeights;

/// Per-topic question counts, in the order topics were selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    counts: Vec<(String, usize)>,
}

impl Allocation {
    #[must_use]
    pub fn get(&self, topic: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Sum of all per-topic counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Split `total` questions across `selected` topics in proportion to their weights.
///
/// Each topic first gets the floor of its proportional share. The leftover questions
/// go one each to the topics with the largest fractional remainders. Equal remainders
/// are resolved by selection order: the topic selected first wins. Shares are computed
/// in integer arithmetic, so the result is fully deterministic and always sums to
/// `total`.
///
/// Repeated topics in `selected` are counted once, at their first position.
///
/// # Errors
///
/// Returns `ConfigurationError::NoTopics` for an empty selection and
/// `ConfigurationError::UnknownTopic` if a topic has no weight.
pub fn allocate<S: AsRef<str>>(
    selected: &[S],
    weights: &TopicWeights,
    total: usize,
) -> Result<Allocation, ConfigurationError> {
    let mut topics: Vec<(&str, u128)> = Vec::with_capacity(selected.len());
    for topic in selected {
        let topic = topic.as_ref();
        if topics.iter().any(|(name, _)| *name == topic) {
            continue;
        }
        let weight = weights
            .weight(topic)
            .ok_or_else(|| ConfigurationError::UnknownTopic(topic.to_owned()))?;
        topics.push((topic, u128::from(weight)));
    }
    if topics.is_empty() {
        return Err(ConfigurationError::NoTopics);
    }

    let weight_sum: u128 = topics.iter().map(|(_, w)| w).sum();
    let target = total as u128;

    // (floor, remainder numerator over `weight_sum`)
    let shares: Vec<(usize, u128)> = topics
        .iter()
        .map(|(_, w)| {
            let scaled = w * target;
            // floor <= total, so it always fits back into usize
            ((scaled / weight_sum) as usize, scaled % weight_sum)
        })
        .collect();

    let mut counts: Vec<(String, usize)> = topics
        .iter()
        .zip(&shares)
        .map(|((name, _), (floor, _))| ((*name).to_owned(), *floor))
        .collect();

    let floored: usize = shares.iter().map(|(floor, _)| floor).sum();
    let remaining = total - floored;

    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    // stable: equal remainders keep selection order
    by_remainder.sort_by_key(|&i| Reverse(shares[i].1));
    for &i in by_remainder.iter().take(remaining) {
        counts[i].1 += 1;
    }

    Ok(Allocation { counts })
}
