//! Content-genre classification and readability metrics.
//!
//! Each of the six [`ContentType`]s owns a keyword list and a small set of
//! case-insensitive patterns. A keyword occurrence scores 1, a pattern match
//! scores 2, and the sum is divided by the word count. Structural signals
//! found in the raw text (lists, code, links, punctuation density) then
//! multiply the per-type scores through a fixed table.
//!
//! No signal at all classifies as [`ContentType::Professional`] with zero
//! confidence.

use std::collections::HashSet;
use std::sync::LazyLock;

use bitflags::bitflags;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::model::{ContentDistribution, ContentType, DifficultyLevel};
use crate::text::{is_blank, sentences, word_tokens};

// ---------------------------------------------------------------------------
// Genre rules
// ---------------------------------------------------------------------------

struct GenreRule {
    keywords: &'static [&'static str],
    patterns: Vec<Regex>,
}

/// Keyword lists and pattern sources, indexed by [`ContentType::index`].
const GENRES: [(&[&str], [&str; 4]); 6] = [
    // Learning
    (
        &[
            "learn", "study", "understand", "explain", "tutorial", "lesson", "chapter",
            "concept", "definition", "example", "exercise", "practice", "knowledge",
            "education", "research", "analysis", "theory", "principle", "method", "technique",
            "skill", "development", "improvement", "mastery", "fundamentals",
        ],
        [
            r"\b(?:how to|learn|understand|explain)\b",
            r"\b(?:step \d+|first|second|third|finally)\b",
            r"\b(?:in conclusion|to summarize|key points)\b",
            r"\b(?:for example|such as|including)\b",
        ],
    ),
    // Entertainment
    (
        &[
            "fun", "exciting", "adventure", "story", "movie", "game", "music", "dance", "party",
            "celebration", "humor", "comedy", "laugh", "entertainment", "show", "performance",
            "video", "social", "friends", "enjoy", "amazing", "awesome", "cool",
        ],
        [
            r"\b(?:haha|lol|omg|wow)\b",
            r"\b(?:check this out|look at this|amazing)\b",
            r"\b(?:so funny|hilarious|incredible)\b",
            r"[!]{2,}|[?]{2,}",
        ],
    ),
    // Narrative
    (
        &[
            "story", "tale", "character", "plot", "journey", "adventure", "once", "began",
            "happened", "told", "narrative", "chapter", "episode", "scene", "dialogue",
            "description", "setting", "conflict", "resolution", "climax", "protagonist",
            "antagonist",
        ],
        [
            r"\b(?:once upon a time|in the beginning|long ago)\b",
            r"\b(?:he said|she said|they said)\b",
            r"\b(?:suddenly|meanwhile|later|finally)\b",
            r"\b(?:the end|to be continued)\b",
        ],
    ),
    // Professional
    (
        &[
            "business", "company", "strategy", "management", "team", "project", "meeting",
            "client", "customer", "service", "solution", "analysis", "report", "proposal",
            "budget", "revenue", "profit", "growth", "market", "industry", "professional",
            "corporate", "organization", "department",
        ],
        [
            r"\b(?:Q\d+|FY\d+|KPI|ROI|CEO|CFO|CTO)\b",
            r"\b(?:please find|attached|regarding|pursuant to)\b",
            r"\b(?:best regards|sincerely|respectfully)\b",
            r"\$[\d,]+\.?\d*",
        ],
    ),
    // Technical
    (
        &[
            "system", "software", "hardware", "code", "programming", "development", "algorithm",
            "database", "server", "network", "security", "protocol", "framework", "library",
            "api", "function", "variable", "parameter", "configuration", "debug",
            "implementation", "deployment", "architecture", "engineering",
        ],
        [
            r"\b(?:var|const|function|class|import|export)\b",
            r"\b(?:HTTP|API|SQL|JSON|XML|CSS|HTML)\b",
            r"\b(?:version \d+|v\d+\.\d+)\b",
            r"[a-zA-Z_][a-zA-Z0-9_]*\(\)",
        ],
    ),
    // Creative
    (
        &[
            "art", "creative", "design", "beautiful", "inspiration", "imagination", "expression",
            "artistic", "aesthetic", "style", "color", "form", "composition", "texture",
            "visual", "audio", "poetry", "music", "painting", "sculpture", "photography",
            "writing", "creation", "innovation", "unique", "original",
        ],
        [
            r"\b(?:imagine|visualize|picture this|envision)\b",
            r"\b(?:artistic|creative|innovative|unique)\b",
            r"\b(?:colors|shapes|forms|textures)\b",
            r"[~]+|[*]+.*[*]+",
        ],
    ),
];

static RULES: LazyLock<Vec<GenreRule>> = LazyLock::new(|| {
    GENRES
        .iter()
        .map(|&(keywords, patterns)| GenreRule {
            keywords,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(&format!("(?i){p}")).expect("genre pattern is valid"))
                .collect(),
        })
        .collect()
});

// ---------------------------------------------------------------------------
// Structural signals
// ---------------------------------------------------------------------------

bitflags! {
    /// Layout and punctuation cues found in the raw text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct StructureSignals: u16 {
        const NUMBERED_LIST = 1 << 0;
        const BULLETS       = 1 << 1;
        /// More than 20% of `.`-delimited segments carry a `?`.
        const QUESTIONS     = 1 << 2;
        /// More than 5% of words carry a `!`.
        const EXCLAMATIONS  = 1 << 3;
        const QUOTES        = 1 << 4;
        const CODE          = 1 << 5;
        const HASHTAGS      = 1 << 6;
        const MENTIONS      = 1 << 7;
        const URLS          = 1 << 8;
    }
}

static NUMBERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+").expect("valid regex"));
static BULLETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[•\-*]\s+").expect("valid regex"));
static QUOTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["'].*["']"#).expect("valid regex"));
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```|`.*`").expect("valid regex"));
static URLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid regex"));
static HASHTAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\w+").expect("valid regex"));
static MENTIONS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").expect("valid regex"));

impl StructureSignals {
    /// Detect every signal in `text`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn detect(text: &str) -> Self {
        let mut signals = Self::empty();
        signals.set(Self::NUMBERED_LIST, NUMBERED_LIST.is_match(text));
        signals.set(Self::BULLETS, BULLETS.is_match(text));

        let questions = text.matches('?').count();
        if questions > 0 {
            let segments = text.split('.').count();
            signals.set(Self::QUESTIONS, questions as f64 / segments as f64 > 0.2);
        }
        let exclamations = text.matches('!').count();
        let words = text.split_whitespace().count();
        if exclamations > 0 && words > 0 {
            signals.set(Self::EXCLAMATIONS, exclamations as f64 / words as f64 > 0.05);
        }

        signals.set(Self::QUOTES, QUOTES.is_match(text));
        signals.set(Self::CODE, CODE.is_match(text));
        signals.set(Self::HASHTAGS, HASHTAGS.is_match(text));
        signals.set(Self::MENTIONS, MENTIONS.is_match(text));
        signals.set(Self::URLS, URLS.is_match(text));
        signals
    }

    /// Per-type score multipliers, indexed by [`ContentType::index`].
    #[must_use]
    pub fn boost(self) -> [f64; 6] {
        use ContentType::{Creative, Entertainment, Learning, Narrative, Professional, Technical};

        let table: [(Self, &[(ContentType, f64)]); 8] = [
            (Self::NUMBERED_LIST, &[(Learning, 1.3), (Professional, 1.1)]),
            (Self::BULLETS, &[(Professional, 1.2), (Learning, 1.1)]),
            (Self::QUESTIONS, &[(Learning, 1.2), (Entertainment, 1.1)]),
            (Self::EXCLAMATIONS, &[(Entertainment, 1.3), (Creative, 1.2)]),
            (Self::QUOTES, &[(Narrative, 1.2), (Creative, 1.1)]),
            (Self::CODE, &[(Technical, 1.5)]),
            (
                Self::HASHTAGS.union(Self::MENTIONS),
                &[(Entertainment, 1.2), (Creative, 1.1)],
            ),
            (Self::URLS, &[(Technical, 1.1), (Professional, 1.1)]),
        ];

        let mut boost = [1.0; 6];
        for (flags, factors) in table {
            if self.intersects(flags) {
                for &(ty, f) in factors {
                    boost[ty.index()] *= f;
                }
            }
        }
        boost
    }
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

/// Lexical readability metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Complexity {
    /// Mean characters per word.
    pub avg_word_length: f64,
    /// Mean words per sentence.
    pub avg_sentence_length: f64,
    /// Distinct words over total words.
    pub vocabulary_richness: f64,
    /// In `[0, 1]`, higher reads easier.
    pub readability_score: f64,
}

impl Complexity {
    /// Composite score used to bucket a [`DifficultyLevel`].
    #[must_use]
    pub fn difficulty_score(&self) -> f64 {
        (self.avg_word_length - 4.0) * 0.3
            + (self.avg_sentence_length - 15.0) * 0.02
            + (self.vocabulary_richness - 0.5) * 0.5
    }

    #[must_use]
    pub fn difficulty(&self) -> DifficultyLevel {
        DifficultyLevel::from_score(self.difficulty_score())
    }
}

// ---------------------------------------------------------------------------
// ContentClassifier
// ---------------------------------------------------------------------------

/// Dominant content type, its confidence, and the normalized distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentReading {
    pub content_type: ContentType,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub distribution: ContentDistribution,
}

impl ContentReading {
    fn empty() -> Self {
        Self {
            content_type: ContentType::Professional,
            confidence: 0.0,
            distribution: ContentType::ALL.iter().map(|&c| (c, 0.0)).collect(),
        }
    }
}

/// Classifies text into one of six content genres.
///
/// Stateless: the rule tables are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentClassifier;

impl ContentClassifier {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Dominant content type and confidence. Empty input is
    /// `(Professional, 0.0)`.
    #[must_use]
    pub fn classify(&self, text: &str) -> (ContentType, f64) {
        let reading = self.reading(text);
        (reading.content_type, reading.confidence)
    }

    /// Boosted scores normalized to sum to 1; all zero without signal.
    #[must_use]
    pub fn distribution(&self, text: &str) -> ContentDistribution {
        self.reading(text).distribution
    }

    /// [`classify`](Self::classify) and
    /// [`distribution`](Self::distribution) in one pass.
    #[must_use]
    pub fn reading(&self, text: &str) -> ContentReading {
        if is_blank(text) {
            return ContentReading::empty();
        }

        let mut scores = base_scores(text);
        let signals = self.structure(text);
        for (score, b) in scores.iter_mut().zip(signals.boost()) {
            *score *= b;
        }

        let mut dominant = ContentType::Professional;
        let mut best = 0.0;
        for c in ContentType::ALL {
            if scores[c.index()] > best {
                best = scores[c.index()];
                dominant = c;
            }
        }
        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            return ContentReading::empty();
        }

        trace!(content_type = %dominant, ?signals, "content reading");
        ContentReading {
            content_type: dominant,
            confidence: best / total,
            distribution: ContentType::ALL
                .iter()
                .map(|&c| (c, scores[c.index()] / total))
                .collect(),
        }
    }

    /// Structural signals present in the raw text.
    #[must_use]
    pub fn structure(&self, text: &str) -> StructureSignals {
        StructureSignals::detect(text)
    }

    /// Readability metrics. All zero for text without words or sentences.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn complexity(&self, text: &str) -> Complexity {
        let words = word_tokens(text);
        let sentence_count = sentences(text).len();
        if words.is_empty() || sentence_count == 0 {
            return Complexity::default();
        }

        let n = words.len() as f64;
        let avg_word_length = words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / n;
        let avg_sentence_length = n / sentence_count as f64;
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
        let vocabulary_richness = distinct.len() as f64 / n;
        let readability_score =
            (1.0 - (avg_sentence_length * 0.02 + avg_word_length * 0.1 - 0.5)).clamp(0.0, 1.0);

        Complexity {
            avg_word_length,
            avg_sentence_length,
            vocabulary_richness,
            readability_score,
        }
    }
}

/// Keyword and pattern score per type, normalized by word count.
#[allow(clippy::cast_precision_loss)]
fn base_scores(text: &str) -> [f64; 6] {
    let lower = text.to_lowercase();
    let words = word_tokens(&lower);
    let word_count = words.len().max(1) as f64;

    let mut scores = [0.0; 6];
    for (score, rule) in scores.iter_mut().zip(RULES.iter()) {
        let keyword_hits = words
            .iter()
            .filter(|w| rule.keywords.contains(&w.as_str()))
            .count();
        let pattern_hits: usize = rule.patterns.iter().map(|p| p.find_iter(&lower).count()).sum();
        *score = (keyword_hits + 2 * pattern_hits) as f64 / word_count;
    }
    scores
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const LEARNING: &str =
        "Let's learn about machine learning fundamentals and understand how neural networks work.";
    const PROFESSIONAL: &str =
        "Our quarterly business results demonstrate strong growth in revenue.";

    // ── classify ────────────────────────────────────────────────────

    #[test]
    fn empty_is_professional_zero() {
        let c = ContentClassifier::new();
        assert_eq!(c.classify(""), (ContentType::Professional, 0.0));
        assert_eq!(c.classify("  \n "), (ContentType::Professional, 0.0));
    }

    #[test]
    fn no_signal_is_professional_zero() {
        assert_eq!(
            ContentClassifier::new().classify("blue sky over the hill"),
            (ContentType::Professional, 0.0)
        );
    }

    #[test]
    fn learning_sentence() {
        let (ty, confidence) = ContentClassifier::new().classify(LEARNING);
        assert_eq!(ty, ContentType::Learning);
        assert!((confidence - 1.0).abs() < 1e-9, "confidence {confidence}");
    }

    #[test]
    fn professional_sentence() {
        let (ty, _) = ContentClassifier::new().classify(PROFESSIONAL);
        assert_eq!(ty, ContentType::Professional);
    }

    #[test]
    fn technical_snippet() {
        let text = "Call the API with a JSON body, then run parse() and check the server logs.";
        let (ty, _) = ContentClassifier::new().classify(text);
        assert_eq!(ty, ContentType::Technical);
    }

    #[test]
    fn narrative_opening() {
        let text = "Once upon a time the protagonist began a long journey. Suddenly, the plot turned.";
        let (ty, _) = ContentClassifier::new().classify(text);
        assert_eq!(ty, ContentType::Narrative);
    }

    #[test]
    fn patterns_are_case_insensitive() {
        let scores = base_scores("Q3 KPI review");
        assert!(scores[ContentType::Professional.index()] > 0.0);
    }

    #[test]
    fn confidence_is_a_fraction() {
        let (_, confidence) =
            ContentClassifier::new().classify("Fun game night! Our team project report is due.");
        assert!((0.0..=1.0).contains(&confidence), "confidence {confidence}");
    }

    // ── distribution ────────────────────────────────────────────────

    #[test]
    fn distribution_sums_to_one_and_covers_all() {
        let dist = ContentClassifier::new().distribution("A tutorial on database security.");
        assert_eq!(dist.len(), ContentType::ALL.len());
        let sum: f64 = dist.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "sum {sum}");
    }

    #[test]
    fn empty_distribution_is_all_zero() {
        let dist = ContentClassifier::new().distribution("");
        assert_eq!(dist.len(), ContentType::ALL.len());
        assert!(dist.values().all(|&v| v == 0.0));
    }

    // ── structure ───────────────────────────────────────────────────

    #[test]
    fn detects_lists_and_bullets() {
        let s = StructureSignals::detect("Steps:\n1. open\n2) close\n- note");
        assert!(s.contains(StructureSignals::NUMBERED_LIST));
        assert!(s.contains(StructureSignals::BULLETS));
    }

    #[test]
    fn detects_code_links_and_social() {
        let s = StructureSignals::detect("See `main()` at https://example.com #rust @ferris");
        assert!(s.contains(
            StructureSignals::CODE
                | StructureSignals::URLS
                | StructureSignals::HASHTAGS
                | StructureSignals::MENTIONS
        ));
    }

    #[test]
    fn question_ratio_threshold() {
        assert!(StructureSignals::detect("Why? How?").contains(StructureSignals::QUESTIONS));
        let many_sentences = "One. Two. Three. Four. Five. Why?";
        assert!(!StructureSignals::detect(many_sentences).contains(StructureSignals::QUESTIONS));
    }

    #[test]
    fn exclamation_ratio_threshold() {
        assert!(StructureSignals::detect("Wow! Great!").contains(StructureSignals::EXCLAMATIONS));
        let long = format!("{} done!", "word ".repeat(40));
        assert!(!StructureSignals::detect(&long).contains(StructureSignals::EXCLAMATIONS));
    }

    #[test]
    fn boost_multiplies_code_and_urls() {
        let boost = (StructureSignals::CODE | StructureSignals::URLS).boost();
        assert!((boost[ContentType::Technical.index()] - 1.65).abs() < 1e-9);
        assert!((boost[ContentType::Professional.index()] - 1.1).abs() < 1e-9);
        assert_eq!(boost[ContentType::Narrative.index()], 1.0);
    }

    #[test]
    fn hashtag_and_mention_share_one_boost() {
        let both = (StructureSignals::HASHTAGS | StructureSignals::MENTIONS).boost();
        let one = StructureSignals::HASHTAGS.boost();
        assert_eq!(both, one);
    }

    #[test]
    fn empty_signals_boost_is_identity() {
        assert_eq!(StructureSignals::empty().boost(), [1.0; 6]);
    }

    // ── complexity ──────────────────────────────────────────────────

    #[test]
    fn complexity_of_empty_is_zero() {
        assert_eq!(ContentClassifier::new().complexity(""), Complexity::default());
        assert_eq!(ContentClassifier::new().complexity("?!"), Complexity::default());
    }

    #[test]
    fn complexity_metrics() {
        let c = ContentClassifier::new().complexity("The cat sat. The dog ran.");
        assert!((c.avg_word_length - 3.0).abs() < 1e-9);
        assert!((c.avg_sentence_length - 3.0).abs() < 1e-9);
        assert!((c.vocabulary_richness - 5.0 / 6.0).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&c.readability_score));
    }

    #[test]
    fn simple_text_is_easy_or_medium() {
        let c = ContentClassifier::new().complexity("I like cats. Cats are nice. They play a lot.");
        assert!(
            c.difficulty() <= DifficultyLevel::Medium,
            "got {:?} (score {})",
            c.difficulty(),
            c.difficulty_score()
        );
    }

    #[test]
    fn dense_technical_text_is_hard_or_expert() {
        let text = "Asynchronous serialization frameworks necessitate comprehensive \
                    architectural considerations regarding backpressure propagation, \
                    idempotent retransmission semantics, and heterogeneous deployment \
                    configurations across distributed infrastructure.";
        let c = ContentClassifier::new().complexity(text);
        assert!(
            c.difficulty() >= DifficultyLevel::Hard,
            "got {:?} (score {})",
            c.difficulty(),
            c.difficulty_score()
        );
    }
}
