//! Keyword-driven emotion detection.
//!
//! Scoring runs in three passes over the cleaned, lowercased tokens:
//!
//! 1. **Keywords.** An exact keyword hit adds 1.0 to its emotion; otherwise
//!    a token that is a substring of (or contains) any of an emotion's
//!    keywords adds 0.5. The partial rule is deliberately loose and lets
//!    short tokens such as `so` touch several emotions at once.
//! 2. **Modifiers.** A degree adverb (`very`, `slightly`, `a bit`, ...)
//!    multiplies an emotion's running score once per exact keyword of that
//!    emotion found in the three tokens that follow it.
//! 3. **Sentiment.** The configured [`SentimentStrategy`] yields a
//!    polarity/subjectivity pair which becomes a per-emotion multiplier.
//!    A strategy failure degrades to the identity multiplier.
//!
//! The dominant emotion is the arg-max of the final scores, ties going to
//! the earliest emotion in [`EmotionType::ALL`].

use std::fmt;
use std::ops::Range;

use tracing::{debug, trace};

use crate::model::{EmotionDistribution, EmotionType};
use crate::sentiment::{SentimentBackend, SentimentStrategy};
use crate::text::{emotion_tokens, is_blank};

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Keyword sets, indexed by [`EmotionType::index`]. Neutral has none.
const KEYWORDS: [&[&str]; 8] = [
    // Happy
    &[
        "happy", "joy", "excited", "wonderful", "amazing", "great", "fantastic", "awesome",
        "brilliant", "excellent", "love", "celebrate", "success", "achievement", "victory",
        "smile", "laugh", "cheerful", "delighted",
    ],
    // Sad
    &[
        "sad", "sorrow", "grief", "depressed", "unhappy", "melancholy", "disappointed",
        "heartbroken", "tragedy", "loss", "cry", "tears", "pain", "hurt", "lonely", "empty",
        "despair", "misery",
    ],
    // Excited
    &[
        "excited", "thrilled", "energetic", "enthusiastic", "passionate", "eager", "pumped",
        "animated", "dynamic", "vibrant", "electric", "intense", "fired up", "exhilarated",
        "rush", "adrenaline",
    ],
    // Calm
    &[
        "calm", "peaceful", "serene", "tranquil", "relaxed", "gentle", "quiet", "still",
        "meditation", "zen", "balance", "harmony", "soothing", "comfortable", "stable",
        "centered", "mindful",
    ],
    // Angry
    &[
        "angry", "rage", "furious", "mad", "irritated", "frustrated", "annoyed", "outraged",
        "livid", "hate", "aggravated", "hostile", "resentful", "bitter", "explosive", "fierce",
        "aggressive",
    ],
    // Fearful
    &[
        "fear", "afraid", "scared", "terrified", "anxious", "worried", "nervous", "panic",
        "dread", "horror", "frightened", "alarmed", "concerned", "uneasy", "apprehensive",
        "timid", "insecure",
    ],
    // Surprised
    &[
        "surprised", "amazed", "astonished", "shocked", "stunned", "bewildered", "confused",
        "unexpected", "sudden", "wow", "incredible", "unbelievable", "extraordinary",
        "remarkable",
    ],
    // Neutral
    &[],
];

const MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("absolutely", 1.3),
    ("completely", 1.2),
    ("totally", 1.2),
    ("quite", 1.1),
    ("really", 1.2),
    ("so", 1.1),
    ("rather", 0.9),
    ("somewhat", 0.8),
    ("slightly", 0.7),
];

/// Modifiers spelled as two consecutive tokens.
const PAIR_MODIFIERS: &[((&str, &str), f64)] = &[(("a", "bit"), 0.6), (("a", "little"), 0.6)];

/// Number of tokens a modifier reaches.
const MODIFIER_REACH: usize = 3;

fn is_keyword(emotion: usize, token: &str) -> bool {
    KEYWORDS[emotion].contains(&token)
}

/// Modifier starting at `tokens[i]`: its factor and the index where its
/// reach begins.
fn modifier_at(tokens: &[String], i: usize) -> Option<(f64, usize)> {
    if let Some(next) = tokens.get(i + 1) {
        let pair = (tokens[i].as_str(), next.as_str());
        if let Some(&(_, m)) = PAIR_MODIFIERS.iter().find(|(p, _)| *p == pair) {
            return Some((m, i + 2));
        }
    }
    MODIFIERS
        .iter()
        .find(|(w, _)| *w == tokens[i])
        .map(|&(_, m)| (m, i + 1))
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Dominant emotion, its intensity, and the full normalized distribution of
/// one text.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionReading {
    pub emotion: EmotionType,
    /// In `[0, 1]`.
    pub intensity: f64,
    pub distribution: EmotionDistribution,
}

impl EmotionReading {
    fn empty() -> Self {
        Self {
            emotion: EmotionType::Neutral,
            intensity: 0.0,
            distribution: zero_distribution(),
        }
    }
}

/// One window of an emotional trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionSegment {
    /// Position of the window, starting at 0.
    pub index: usize,
    /// Word indices covered by the window.
    pub word_range: Range<usize>,
    pub emotion: EmotionType,
    pub intensity: f64,
}

fn zero_distribution() -> EmotionDistribution {
    EmotionType::ALL.iter().map(|&e| (e, 0.0)).collect()
}

// ---------------------------------------------------------------------------
// EmotionDetector
// ---------------------------------------------------------------------------

/// Scores free text against the emotion keyword sets.
///
/// The sentiment strategy is fixed at construction. The detector holds no
/// other state, so a shared reference can score texts from many threads.
pub struct EmotionDetector {
    sentiment: Box<dyn SentimentStrategy>,
}

impl fmt::Debug for EmotionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmotionDetector")
            .field("sentiment", &self.sentiment.name())
            .finish()
    }
}

impl Default for EmotionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionDetector {
    /// Detector backed by the lexical sentiment strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(SentimentBackend::default())
    }

    #[must_use]
    pub fn with_backend(backend: SentimentBackend) -> Self {
        Self {
            sentiment: backend.strategy(),
        }
    }

    /// Detector backed by a caller-supplied strategy.
    #[must_use]
    pub fn with_strategy(strategy: impl SentimentStrategy + 'static) -> Self {
        Self {
            sentiment: Box::new(strategy),
        }
    }

    /// Name of the active sentiment strategy.
    #[must_use]
    pub fn sentiment_name(&self) -> &'static str {
        self.sentiment.name()
    }

    /// Dominant emotion and its intensity.
    ///
    /// Empty, whitespace-only, or punctuation-only input is
    /// `(Neutral, 0.0)`.
    #[must_use]
    pub fn detect(&self, text: &str) -> (EmotionType, f64) {
        let reading = self.reading(text);
        (reading.emotion, reading.intensity)
    }

    /// L1-normalized scores over every emotion; all zero when nothing
    /// scored.
    #[must_use]
    pub fn distribution(&self, text: &str) -> EmotionDistribution {
        self.reading(text).distribution
    }

    /// [`detect`](Self::detect) and [`distribution`](Self::distribution) in
    /// one scoring pass.
    #[must_use]
    pub fn reading(&self, text: &str) -> EmotionReading {
        if is_blank(text) {
            return EmotionReading::empty();
        }
        let tokens = emotion_tokens(text);
        if tokens.is_empty() {
            return EmotionReading::empty();
        }

        let scores = self.scores(text, &tokens);

        let mut dominant = EmotionType::Neutral;
        let mut best = 0.0;
        for e in EmotionType::ALL {
            if scores[e.index()] > best {
                best = scores[e.index()];
                dominant = e;
            }
        }

        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            return EmotionReading::empty();
        }

        #[allow(clippy::cast_precision_loss)]
        let intensity = (best / tokens.len() as f64).min(1.0);
        let distribution = EmotionType::ALL
            .iter()
            .map(|&e| (e, scores[e.index()] / total))
            .collect();

        trace!(emotion = %dominant, intensity, tokens = tokens.len(), "emotion reading");
        EmotionReading {
            emotion: dominant,
            intensity,
            distribution,
        }
    }

    /// Split `text` into windows of `window` whitespace-delimited words and
    /// detect each one.
    ///
    /// The iterator is `Clone`, so a trajectory can be replayed without
    /// re-splitting. A window of 0 is treated as 1.
    #[must_use]
    pub fn trajectory<'a>(&'a self, text: &'a str, window: usize) -> Trajectory<'a> {
        Trajectory {
            detector: self,
            words: text.split_whitespace().collect(),
            window: window.max(1),
            next: 0,
        }
    }

    // -- scoring passes ----------------------------------------------------

    fn scores(&self, text: &str, tokens: &[String]) -> [f64; 8] {
        let mut scores = keyword_scores(tokens);
        apply_modifiers(&mut scores, tokens);

        let boost = match self.sentiment.score(text) {
            Ok(sentiment) => sentiment.emotion_boost(),
            Err(err) => {
                debug!(strategy = self.sentiment.name(), %err, "sentiment unavailable, using neutral boost");
                [1.0; 8]
            }
        };
        for (score, b) in scores.iter_mut().zip(boost) {
            *score *= b;
        }
        scores
    }
}

fn keyword_scores(tokens: &[String]) -> [f64; 8] {
    let mut scores = [0.0; 8];
    for token in tokens {
        for (i, keywords) in KEYWORDS.iter().enumerate() {
            if keywords.contains(&token.as_str()) {
                scores[i] += 1.0;
            } else if keywords
                .iter()
                .any(|k| k.contains(token.as_str()) || token.contains(k))
            {
                scores[i] += 0.5;
            }
        }
    }
    scores
}

fn apply_modifiers(scores: &mut [f64; 8], tokens: &[String]) {
    for i in 0..tokens.len() {
        let Some((factor, start)) = modifier_at(tokens, i) else {
            continue;
        };
        let end = (start + MODIFIER_REACH).min(tokens.len());
        for token in &tokens[start..end] {
            for (e, score) in scores.iter_mut().enumerate() {
                if is_keyword(e, token) {
                    *score *= factor;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Trajectory
// ---------------------------------------------------------------------------

/// Iterator over the [`EmotionSegment`]s of a text.
#[derive(Debug, Clone)]
pub struct Trajectory<'a> {
    detector: &'a EmotionDetector,
    words: Vec<&'a str>,
    window: usize,
    next: usize,
}

impl Iterator for Trajectory<'_> {
    type Item = EmotionSegment;

    fn next(&mut self) -> Option<EmotionSegment> {
        let start = self.next * self.window;
        if start >= self.words.len() {
            return None;
        }
        let end = (start + self.window).min(self.words.len());
        let segment = self.words[start..end].join(" ");
        let (emotion, intensity) = self.detector.detect(&segment);

        let index = self.next;
        self.next += 1;
        Some(EmotionSegment {
            index,
            word_range: start..end,
            emotion,
            intensity,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .words
            .len()
            .div_ceil(self.window)
            .saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Trajectory<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
