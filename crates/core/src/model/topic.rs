use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicWeightError {
    #[error("topic name cannot be empty")]
    EmptyName,

    #[error("weight for topic {topic:?} must be > 0")]
    ZeroWeight { topic: String },

    #[error("topic {topic:?} is declared more than once")]
    Duplicate { topic: String },
}

/// A single topic and its relative share of the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicWeight {
    name: String,
    weight: u32,
}

impl TopicWeight {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// Process-wide topic weight table.
///
/// Declaration order is preserved so topic listings are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicWeights {
    entries: Vec<TopicWeight>,
}

impl TopicWeights {
    /// Builds a weight table from `(name, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `TopicWeightError` for blank names, zero weights, or duplicates.
    pub fn new<I, S>(entries: I) -> Result<Self, TopicWeightError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut table: Vec<TopicWeight> = Vec::new();
        for (name, weight) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(TopicWeightError::EmptyName);
            }
            if weight == 0 {
                return Err(TopicWeightError::ZeroWeight { topic: name });
            }
            if table.iter().any(|t| t.name == name) {
                return Err(TopicWeightError::Duplicate { topic: name });
            }
            table.push(TopicWeight { name, weight });
        }
        Ok(Self { entries: table })
    }

    /// The stock-market curriculum the quiz ships with.
    #[must_use]
    pub fn curriculum() -> Self {
        const CURRICULUM: [(&str, u32); 16] = [
            ("Introduction to Stock Market", 8),
            ("Types of Financial Markets", 7),
            ("Equity Instruments", 5),
            ("Corporate Actions", 5),
            ("Equity Valuation Basics", 10),
            ("Fundamental Analysis", 12),
            ("Technical Analysis", 12),
            ("Investment Strategies", 8),
            ("Risk & Return", 8),
            ("Trading and Investing in Equities", 7),
            ("Tools & Trading Platforms", 5),
            ("Regulatory Framework & Taxation", 5),
            ("Psychology of Investing", 3),
            ("Case Studies", 3),
            ("Geopolitical Risk in Stock Market", 5),
            ("Practical Market Strategies", 7),
        ];
        Self {
            entries: CURRICULUM
                .iter()
                .map(|(name, weight)| TopicWeight {
                    name: (*name).to_owned(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn weight(&self, topic: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|t| t.name == topic)
            .map(TopicWeight::weight)
    }

    #[must_use]
    pub fn contains(&self, topic: &str) -> bool {
        self.weight(topic).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(TopicWeight::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicWeight> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
