//! The analysis pipeline: emotion + genre + difficulty, merged into a
//! [`ContentProfile`] and cached by exact text.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::cache::{AnalysisCache, CacheStats};
use crate::classify::{ContentClassifier, ContentReading};
use crate::emotion::{EmotionDetector, EmotionReading};
use crate::model::{
    AnalysisResult, AnalysisSummary, ContentDistribution, ContentProfile, ContentType,
    DifficultyLevel, EmotionDistribution, EmotionType,
};
use crate::text::{sentences, word_tokens};

/// Baseline reading speed in words per minute.
pub const BASE_READING_SPEED: f64 = 250.0;

/// Distribution share above which a type or emotion counts as a key theme.
const KEY_THEME_THRESHOLD: f64 = 0.2;
const MAX_KEY_THEMES: usize = 5;
const MAX_KEYWORDS: usize = 20;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

// ---------------------------------------------------------------------------
// ContentAnalyzer
// ---------------------------------------------------------------------------

/// Runs the emotion detector and the content classifier over a text and
/// merges their readings into an [`AnalysisResult`].
#[derive(Debug)]
pub struct ContentAnalyzer {
    detector: EmotionDetector,
    classifier: ContentClassifier,
    cache: Arc<AnalysisCache>,
    parallel: bool,
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAnalyzer {
    /// Analyzer with the default detector, a private cache, and parallel
    /// scoring enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detector: EmotionDetector::new(),
            classifier: ContentClassifier::new(),
            cache: Arc::new(AnalysisCache::new()),
            parallel: true,
        }
    }

    #[must_use]
    pub fn with_detector(mut self, detector: EmotionDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Share `cache` with other owners.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<AnalysisCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Run the detector and classifier (and batch items) on the rayon pool
    /// when `true`, sequentially otherwise.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub const fn detector(&self) -> &EmotionDetector {
        &self.detector
    }

    #[must_use]
    pub const fn classifier(&self) -> &ContentClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<AnalysisCache> {
        &self.cache
    }

    /// Analyze one text.
    ///
    /// With `use_cache`, a previous result for byte-identical text is
    /// returned with `processing_time` set to the lookup cost, and a fresh
    /// result is stored.
    #[must_use]
    pub fn analyze(&self, text: &str, use_cache: bool) -> AnalysisResult {
        let started = Instant::now();
        if use_cache {
            if let Some(hit) = self.cache.get_refreshed(text, started) {
                debug!(chars = hit.character_count, "analysis cache hit");
                return hit;
            }
        }

        let (emotion, content) = self.readings(text);
        let difficulty = self.classifier.complexity(text).difficulty();

        let profile = ContentProfile {
            emotion: emotion.emotion,
            content_type: content.content_type,
            difficulty,
            emotion_intensity: emotion.intensity,
            reading_speed: BASE_READING_SPEED * content.content_type.reading_pace(),
            key_themes: key_themes(&content.distribution, &emotion.distribution),
            recommended_theme: recommend_theme(emotion.emotion, content.content_type, difficulty),
            confidence: content.confidence,
        };

        let result = AnalysisResult {
            text: text.to_string(),
            profile,
            processing_time: started.elapsed(),
            word_count: text.split_whitespace().count(),
            character_count: text.chars().count(),
            sentences: sentences(text),
            keywords: extract_keywords(text),
        };

        debug!(
            emotion = %result.profile.emotion,
            content_type = %result.profile.content_type,
            difficulty = %result.profile.difficulty,
            theme = %result.profile.recommended_theme,
            elapsed = ?result.processing_time,
            "analyzed text"
        );

        if use_cache {
            self.cache.insert(result.clone());
        }
        result
    }

    /// Analyze every text, one result per input in input order.
    #[must_use]
    pub fn analyze_batch<S>(&self, texts: &[S], use_cache: bool) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        if self.parallel {
            texts
                .par_iter()
                .map(|t| self.analyze(t.as_ref(), use_cache))
                .collect()
        } else {
            texts
                .iter()
                .map(|t| self.analyze(t.as_ref(), use_cache))
                .collect()
        }
    }

    #[must_use]
    pub fn analysis_summary(&self, result: &AnalysisResult) -> AnalysisSummary {
        AnalysisSummary::from(result)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn readings(&self, text: &str) -> (EmotionReading, ContentReading) {
        if self.parallel {
            rayon::join(
                || self.detector.reading(text),
                || self.classifier.reading(text),
            )
        } else {
            (self.detector.reading(text), self.classifier.reading(text))
        }
    }
}

// ---------------------------------------------------------------------------
// Profile derivation
// ---------------------------------------------------------------------------

/// Content types and then emotions whose share exceeds 0.2, capped at five.
/// Emotion entries carry an `_emotion` suffix.
#[must_use]
pub fn key_themes(content: &ContentDistribution, emotion: &EmotionDistribution) -> Vec<String> {
    let content_themes = content
        .iter()
        .filter(|&(_, &score)| score > KEY_THEME_THRESHOLD)
        .map(|(c, _)| c.name().to_string());
    let emotion_themes = emotion
        .iter()
        .filter(|&(_, &score)| score > KEY_THEME_THRESHOLD)
        .map(|(e, _)| format!("{}_emotion", e.name()));
    content_themes.chain(emotion_themes).take(MAX_KEY_THEMES).collect()
}

/// Theme identifier for a profile.
///
/// The content type picks a family (`learning`, `professional`,
/// `emotional`) and the emotion picks a variant within it. Emotions without
/// a variant (angry, surprised) fall through to a difficulty variant:
/// `_sophisticated` for expert, `_accessible` for easy, else the bare
/// family name.
#[must_use]
pub fn recommend_theme(
    emotion: EmotionType,
    content_type: ContentType,
    difficulty: DifficultyLevel,
) -> String {
    let family = match content_type {
        ContentType::Learning => "learning",
        ContentType::Narrative | ContentType::Creative => "emotional",
        ContentType::Professional | ContentType::Entertainment | ContentType::Technical => {
            "professional"
        }
    };

    let variant = match (emotion, family) {
        (EmotionType::Happy | EmotionType::Excited, "learning") => Some("energetic"),
        (EmotionType::Happy | EmotionType::Excited, "professional") => Some("positive"),
        (EmotionType::Happy | EmotionType::Excited, _) => Some("vibrant"),
        (EmotionType::Calm | EmotionType::Neutral, "learning") => Some("focused"),
        (EmotionType::Calm | EmotionType::Neutral, "professional") => Some("minimal"),
        (EmotionType::Calm | EmotionType::Neutral, _) => Some("serene"),
        (EmotionType::Sad | EmotionType::Fearful, "learning") => Some("supportive"),
        (EmotionType::Sad | EmotionType::Fearful, "professional") => Some("subtle"),
        (EmotionType::Sad | EmotionType::Fearful, _) => Some("contemplative"),
        (EmotionType::Angry | EmotionType::Surprised, _) => match difficulty {
            DifficultyLevel::Expert => Some("sophisticated"),
            DifficultyLevel::Easy => Some("accessible"),
            DifficultyLevel::Medium | DifficultyLevel::Hard => None,
        },
    };

    variant.map_or_else(|| family.to_string(), |v| format!("{family}_{v}"))
}

/// The twenty most frequent content words, most frequent first; ties keep
/// first-occurrence order. Stop words and words of two characters or fewer
/// are skipped.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for word in word_tokens(text) {
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if let Some(&slot) = slots.get(&word) {
            counts[slot].1 += 1;
        } else {
            slots.insert(word.clone(), counts.len());
            counts.push((word, 1));
        }
    }

    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(MAX_KEYWORDS).map(|(w, _)| w).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
