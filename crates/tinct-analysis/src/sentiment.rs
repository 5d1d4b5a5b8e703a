//! Sentiment strategies — polarity and subjectivity estimates that bias the
//! emotion scores.
//!
//! Two interchangeable backends implement [`SentimentStrategy`]:
//!
//! - [`LexicalSentiment`]: a valence lexicon with negation and intensifier
//!   handling. The richer of the two; the default.
//! - [`KeywordRatioSentiment`]: a count of eight positive and eight negative
//!   words relative to the token count.
//!
//! The backend is chosen once, when the detector is built (see
//! [`SentimentBackend`]). A strategy error is never fatal: the detector
//! replaces it with neutral multipliers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::EmotionType;
use crate::text::emotion_tokens;

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Polarity in `[-1, 1]` and subjectivity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Self = Self {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    fn clamped(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }

    /// Per-emotion multipliers, indexed by [`EmotionType::index`].
    ///
    /// Positive polarity (> 0.1) lifts happy/excited and damps
    /// sad/angry/fearful; negative polarity (< -0.1) does the inverse.
    /// Subjectivity above 0.5 amplifies happy/sad/excited/angry/fearful on
    /// top of that; calm, surprised and neutral are never amplified.
    #[must_use]
    pub fn emotion_boost(self) -> [f64; 8] {
        use EmotionType::{Angry, Excited, Fearful, Happy, Sad};

        let mut boost = [1.0; 8];
        let p = self.polarity;
        if p > 0.1 {
            boost[Happy.index()] = 0.5f64.mul_add(p, 1.0);
            boost[Excited.index()] = 0.3f64.mul_add(p, 1.0);
            boost[Sad.index()] = (-0.3f64).mul_add(p, 1.0);
            boost[Angry.index()] = (-0.3f64).mul_add(p, 1.0);
            boost[Fearful.index()] = (-0.2f64).mul_add(p, 1.0);
        } else if p < -0.1 {
            let a = p.abs();
            boost[Sad.index()] = 0.5f64.mul_add(a, 1.0);
            boost[Angry.index()] = 0.4f64.mul_add(a, 1.0);
            boost[Fearful.index()] = 0.3f64.mul_add(a, 1.0);
            boost[Happy.index()] = (-0.4f64).mul_add(a, 1.0);
            boost[Excited.index()] = (-0.3f64).mul_add(a, 1.0);
        }

        if self.subjectivity > 0.5 {
            let amp = 0.3f64.mul_add(self.subjectivity - 0.5, 1.0);
            for e in [Happy, Sad, Excited, Angry, Fearful] {
                boost[e.index()] *= amp;
            }
        }
        boost
    }
}

/// Why a strategy could not score a text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentimentError {
    #[error("text has no scorable word tokens")]
    NoScorableTokens,
}

/// A way of estimating sentiment from raw text.
pub trait SentimentStrategy: Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Score `text`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] when the text cannot be scored at all.
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError>;
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// Configuration-level choice of sentiment strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentBackend {
    #[default]
    Lexical,
    KeywordRatio,
}

impl SentimentBackend {
    /// Build the strategy for this backend.
    #[must_use]
    pub fn strategy(self) -> Box<dyn SentimentStrategy> {
        match self {
            Self::Lexical => Box::new(LexicalSentiment),
            Self::KeywordRatio => Box::new(KeywordRatioSentiment),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::KeywordRatio => "keyword-ratio",
        }
    }
}

// ---------------------------------------------------------------------------
// KeywordRatioSentiment
// ---------------------------------------------------------------------------

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "love", "happy", "joy",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "sad", "angry", "fear", "worry",
];

/// Ratio of fixed positive/negative words to all tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRatioSentiment;

impl SentimentStrategy for KeywordRatioSentiment {
    fn name(&self) -> &'static str {
        "keyword-ratio"
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let tokens = emotion_tokens(text);
        if tokens.is_empty() {
            return Err(SentimentError::NoScorableTokens);
        }

        let positive = tokens.iter().filter(|t| POSITIVE_WORDS.contains(&t.as_str())).count();
        let negative = tokens.iter().filter(|t| NEGATIVE_WORDS.contains(&t.as_str())).count();
        let n = tokens.len() as f64;

        let hits = positive + negative;
        let polarity = if hits == 0 {
            0.0
        } else {
            (positive as f64 - negative as f64) / n
        };
        Ok(Sentiment::clamped(polarity, hits as f64 / n))
    }
}

// ---------------------------------------------------------------------------
// LexicalSentiment
// ---------------------------------------------------------------------------

/// `(word, polarity, subjectivity)`.
const LEXICON: &[(&str, f64, f64)] = &[
    // Positive
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("brilliant", 0.9, 1.0),
    ("calm", 0.3, 0.75),
    ("cheerful", 0.8, 0.8),
    ("delighted", 0.7, 0.8),
    ("enjoy", 0.4, 0.5),
    ("excellent", 1.0, 1.0),
    ("excited", 0.375, 0.75),
    ("exciting", 0.3, 0.8),
    ("fantastic", 0.4, 0.9),
    ("fun", 0.3, 0.2),
    ("gentle", 0.3, 0.6),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("incredible", 0.9, 0.9),
    ("joy", 0.8, 0.9),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("nice", 0.6, 1.0),
    ("peaceful", 0.5, 0.7),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.7, 0.9),
    ("strong", 0.43, 0.73),
    ("success", 0.6, 0.5),
    ("thrilled", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    // Negative
    ("afraid", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("anxious", -0.25, 0.75),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("bitter", -0.1, 0.6),
    ("disappointed", -0.75, 0.75),
    ("dread", -0.7, 0.9),
    ("fear", -0.5, 0.8),
    ("frustrated", -0.7, 0.7),
    ("furious", -0.9, 1.0),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("hurt", -0.5, 0.6),
    ("lonely", -0.6, 0.85),
    ("miserable", -1.0, 1.0),
    ("nervous", -0.3, 0.8),
    ("pain", -0.6, 0.8),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("scared", -0.6, 0.9),
    ("terrible", -1.0, 1.0),
    ("terrified", -0.9, 1.0),
    ("tragic", -0.75, 0.9),
    ("ugly", -0.7, 1.0),
    ("unhappy", -0.6, 0.9),
    ("upset", -0.5, 0.8),
    ("worried", -0.4, 0.8),
    ("worry", -0.4, 0.7),
    ("worst", -1.0, 1.0),
];

/// Degree adverbs scaling the next scored word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("really", 1.2),
    ("so", 1.1),
    ("quite", 1.1),
    ("totally", 1.2),
    ("absolutely", 1.3),
    ("somewhat", 0.8),
    ("slightly", 0.7),
];

/// Polarity multiplier applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

fn is_negation(token: &str) -> bool {
    matches!(token, "not" | "never" | "no" | "nor" | "cannot") || token.ends_with("n't")
}

fn lexicon_entry(token: &str) -> Option<(f64, f64)> {
    LEXICON
        .iter()
        .find(|(w, _, _)| *w == token)
        .map(|&(_, p, s)| (p, s))
}

/// Lexicon-driven polarity with negation and intensifiers.
///
/// Each lexicon hit contributes its polarity (scaled by a preceding
/// intensifier, flipped and halved by a preceding negation) and its
/// subjectivity. The result is the mean over hits; text with tokens but no
/// hits scores neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSentiment;

impl SentimentStrategy for LexicalSentiment {
    fn name(&self) -> &'static str {
        "lexical"
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let tokens = emotion_tokens(text);
        if tokens.is_empty() {
            return Err(SentimentError::NoScorableTokens);
        }

        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;
        let mut negated = false;
        let mut scale = 1.0;

        for token in &tokens {
            if is_negation(token) {
                negated = true;
                continue;
            }
            if let Some(&(_, m)) = INTENSIFIERS.iter().find(|(w, _)| w == token) {
                scale *= m;
                continue;
            }
            if let Some((p, s)) = lexicon_entry(token) {
                let mut p = (p * scale).clamp(-1.0, 1.0);
                if negated {
                    p *= NEGATION_FACTOR;
                }
                polarity_sum += p;
                subjectivity_sum += (s * scale).min(1.0);
                hits += 1;
            }
            // Modifiers only reach the next content word.
            negated = false;
            scale = 1.0;
        }

        if hits == 0 {
            return Ok(Sentiment::NEUTRAL);
        }
        let n = hits as f64;
        Ok(Sentiment::clamped(polarity_sum / n, subjectivity_sum / n))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── emotion_boost ───────────────────────────────────────────────

    #[test]
    fn neutral_boost_is_identity() {
        assert_eq!(Sentiment::NEUTRAL.emotion_boost(), [1.0; 8]);
    }

    #[test]
    fn positive_polarity_lifts_happy_damps_sad() {
        let boost = Sentiment { polarity: 0.5, subjectivity: 0.0 }.emotion_boost();
        assert!(approx_eq(boost[EmotionType::Happy.index()], 1.25));
        assert!(approx_eq(boost[EmotionType::Excited.index()], 1.15));
        assert!(approx_eq(boost[EmotionType::Sad.index()], 0.85));
        assert!(approx_eq(boost[EmotionType::Fearful.index()], 0.9));
        assert!(approx_eq(boost[EmotionType::Calm.index()], 1.0));
    }

    #[test]
    fn negative_polarity_lifts_sad_damps_happy() {
        let boost = Sentiment { polarity: -0.5, subjectivity: 0.0 }.emotion_boost();
        assert!(approx_eq(boost[EmotionType::Sad.index()], 1.25));
        assert!(approx_eq(boost[EmotionType::Angry.index()], 1.2));
        assert!(approx_eq(boost[EmotionType::Happy.index()], 0.8));
    }

    #[test]
    fn weak_polarity_is_ignored() {
        let boost = Sentiment { polarity: 0.05, subjectivity: 0.0 }.emotion_boost();
        assert_eq!(boost, [1.0; 8]);
    }

    #[test]
    fn subjectivity_amplifies_but_not_calm_surprise_neutral() {
        let boost = Sentiment { polarity: 0.0, subjectivity: 1.0 }.emotion_boost();
        assert!(approx_eq(boost[EmotionType::Angry.index()], 1.15));
        assert!(approx_eq(boost[EmotionType::Calm.index()], 1.0));
        assert!(approx_eq(boost[EmotionType::Surprised.index()], 1.0));
        assert!(approx_eq(boost[EmotionType::Neutral.index()], 1.0));
    }

    // ── KeywordRatioSentiment ───────────────────────────────────────

    #[test]
    fn keyword_ratio_counts_hits() {
        let s = KeywordRatioSentiment.score("a good day and a bad day").unwrap();
        assert!(approx_eq(s.polarity, 0.0));
        assert!(approx_eq(s.subjectivity, 2.0 / 7.0));
    }

    #[test]
    fn keyword_ratio_positive() {
        let s = KeywordRatioSentiment.score("great, great news!").unwrap();
        assert!(approx_eq(s.polarity, 2.0 / 3.0));
    }

    #[test]
    fn keyword_ratio_rejects_empty() {
        assert_eq!(
            KeywordRatioSentiment.score("  ?! "),
            Err(SentimentError::NoScorableTokens)
        );
    }

    // ── LexicalSentiment ────────────────────────────────────────────

    #[test]
    fn lexical_positive_text() {
        let s = LexicalSentiment.score("What a wonderful, happy day").unwrap();
        assert!(s.polarity > 0.5, "polarity {}", s.polarity);
        assert!(s.subjectivity > 0.5);
    }

    #[test]
    fn lexical_negative_text() {
        let s = LexicalSentiment.score("This is a terrible and sad situation").unwrap();
        assert!(s.polarity < -0.5, "polarity {}", s.polarity);
    }

    #[test]
    fn lexical_negation_flips() {
        let plain = LexicalSentiment.score("it is good").unwrap();
        let negated = LexicalSentiment.score("it is not good").unwrap();
        assert!(plain.polarity > 0.0);
        assert!(negated.polarity < 0.0);
        assert!(negated.polarity.abs() < plain.polarity);
    }

    #[test]
    fn lexical_contraction_negation() {
        let s = LexicalSentiment.score("I don't love it").unwrap();
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn lexical_intensifier_scales() {
        let plain = LexicalSentiment.score("a good plan").unwrap();
        let strong = LexicalSentiment.score("a very good plan").unwrap();
        assert!(strong.polarity > plain.polarity);
    }

    #[test]
    fn lexical_no_hits_is_neutral() {
        let s = LexicalSentiment.score("the table has four legs").unwrap();
        assert_eq!(s, Sentiment::NEUTRAL);
    }

    #[test]
    fn lexical_rejects_empty() {
        assert!(LexicalSentiment.score("").is_err());
    }

    #[test]
    fn lexicon_lookup_finds_every_entry() {
        for &(word, p, _) in LEXICON {
            let (found, _) = lexicon_entry(word).unwrap();
            assert!(approx_eq(found, p), "{word}");
        }
    }

    // ── Backend ─────────────────────────────────────────────────────

    #[test]
    fn backend_builds_matching_strategy() {
        assert_eq!(SentimentBackend::Lexical.strategy().name(), "lexical");
        assert_eq!(SentimentBackend::KeywordRatio.strategy().name(), "keyword-ratio");
        assert_eq!(SentimentBackend::default(), SentimentBackend::Lexical);
    }
}
