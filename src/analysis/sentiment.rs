//! Sentiment scoring capability
//!
//! Scoring is best-effort: the crawler receives an optional scorer, omits the
//! field when there is none, and records 0.0 when the scorer fails.

use thiserror::Error;

/// Failure of a sentiment backend
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("Sentiment backend unavailable: {0}")]
    Unavailable(String),

    #[error("Could not score text: {0}")]
    Scoring(String),
}

/// Scores text polarity in `[-1.0, 1.0]`
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Runs a scorer, turning any failure into a neutral score
pub fn score_or_neutral(scorer: &dyn SentimentScorer, text: &str) -> f64 {
    match scorer.score(text) {
        Ok(score) if score.is_finite() => score.clamp(-1.0, 1.0),
        Ok(score) => {
            tracing::debug!("Discarding non-finite sentiment score {}", score);
            0.0
        }
        Err(e) => {
            tracing::debug!("Sentiment scoring failed: {}", e);
            0.0
        }
    }
}

const POSITIVE: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "brilliant", "cool", "enjoy", "enjoyed",
    "excellent", "fantastic", "fun", "funny", "glad", "good", "great", "happy", "helpful",
    "incredible", "interesting", "like", "love", "loved", "lovely", "nice", "perfect",
    "thank", "thanks", "useful", "wonderful", "wow", "bagus", "keren", "mantap", "suka",
];

const NEGATIVE: &[&str] = &[
    "annoying", "awful", "bad", "boring", "broken", "disappointed", "disappointing",
    "dislike", "dumb", "fake", "hate", "hated", "horrible", "poor", "sad", "scam",
    "stupid", "terrible", "trash", "ugly", "useless", "waste", "worse", "worst", "wrong",
    "jelek", "buruk",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "isnt", "isn't", "tidak", "bukan",
];

/// Small lexicon-based polarity scorer
///
/// Each lexicon hit counts +1 or -1, flipped when the previous token is a
/// negation; the sum is normalized by the number of hits.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, SentimentError> {
        let tokens: Vec<String> = text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect();

        let mut total = 0i32;
        let mut hits = 0i32;

        for (i, token) in tokens.iter().enumerate() {
            let polarity = if POSITIVE.contains(&token.as_str()) {
                1
            } else if NEGATIVE.contains(&token.as_str()) {
                -1
            } else {
                continue;
            };

            let negated = i > 0 && NEGATIONS.contains(&tokens[i - 1].as_str());
            total += if negated { -polarity } else { polarity };
            hits += 1;
        }

        if hits == 0 {
            return Ok(0.0);
        }
        Ok(f64::from(total) / f64::from(hits))
    }
}
