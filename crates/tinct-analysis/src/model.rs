//! Profile data model — the closed enumerations and the records handed to
//! the theming and rendering layers.
//!
//! Every enumeration serializes as its lowercase name (`"happy"`,
//! `"learning"`, `"expert"`), which is also what [`fmt::Display`] prints and
//! what `from_name` accepts.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EmotionType
// ---------------------------------------------------------------------------

/// Dominant emotional tone of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionType {
    Happy,
    Sad,
    Excited,
    Calm,
    Angry,
    Fearful,
    Surprised,
    /// No emotional signal. Never carries keywords of its own.
    Neutral,
}

impl EmotionType {
    /// All emotions, in scoring order. Ties in arg-max resolve to the
    /// earliest entry.
    pub const ALL: [Self; 8] = [
        Self::Happy,
        Self::Sad,
        Self::Excited,
        Self::Calm,
        Self::Angry,
        Self::Fearful,
        Self::Surprised,
        Self::Neutral,
    ];

    /// Position in [`Self::ALL`]; used to index fixed-size score arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Calm => "calm",
            Self::Angry => "angry",
            Self::Fearful => "fearful",
            Self::Surprised => "surprised",
            Self::Neutral => "neutral",
        }
    }

    /// Parse from a name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.iter().find(|e| e.name() == lower).copied()
    }

    /// Energetic, positive emotions.
    #[must_use]
    pub const fn is_upbeat(self) -> bool {
        matches!(self, Self::Happy | Self::Excited)
    }
}

impl fmt::Display for EmotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Content genre of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Learning,
    Entertainment,
    Narrative,
    Professional,
    Technical,
    Creative,
}

impl ContentType {
    pub const ALL: [Self; 6] = [
        Self::Learning,
        Self::Entertainment,
        Self::Narrative,
        Self::Professional,
        Self::Technical,
        Self::Creative,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Entertainment => "entertainment",
            Self::Narrative => "narrative",
            Self::Professional => "professional",
            Self::Technical => "technical",
            Self::Creative => "creative",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.iter().find(|c| c.name() == lower).copied()
    }

    /// Reading-pace multiplier applied to the 250 wpm baseline.
    #[must_use]
    pub const fn reading_pace(self) -> f64 {
        match self {
            Self::Learning => 0.8,
            Self::Entertainment => 1.2,
            Self::Narrative => 1.0,
            Self::Professional => 0.9,
            Self::Technical => 0.7,
            Self::Creative => 1.1,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// DifficultyLevel
// ---------------------------------------------------------------------------

/// Reading difficulty, ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl DifficultyLevel {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.iter().find(|d| d.name() == lower).copied()
    }

    /// Bucket a composite complexity score.
    ///
    /// | score          | level    |
    /// |----------------|----------|
    /// | `< -0.3`       | easy     |
    /// | `< 0.1`        | medium   |
    /// | `< 0.4`        | hard     |
    /// | otherwise      | expert   |
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < -0.3 {
            Self::Easy
        } else if score < 0.1 {
            Self::Medium
        } else if score < 0.4 {
            Self::Hard
        } else {
            Self::Expert
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Profile + result records
// ---------------------------------------------------------------------------

/// Structured summary of one text: what it feels like, what kind of text it
/// is, how hard it is to read, and which theme presents it best.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProfile {
    pub emotion: EmotionType,
    pub content_type: ContentType,
    pub difficulty: DifficultyLevel,
    /// In `[0, 1]`.
    pub emotion_intensity: f64,
    /// Words per minute, always `> 0`.
    pub reading_speed: f64,
    /// At most five entries.
    pub key_themes: Vec<String>,
    pub recommended_theme: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

impl ContentProfile {
    /// Replace the recommended theme with a caller preference.
    ///
    /// The name is not validated here; the theme generator falls back to
    /// profile-driven synthesis when it names no known palette.
    pub fn override_theme(&mut self, theme: impl Into<String>) {
        self.recommended_theme = theme.into();
    }
}

/// Full output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub profile: ContentProfile,
    /// Wall-clock cost of the analysis. On a cache hit this is the cost of
    /// the lookup, not of the original computation.
    #[serde(with = "duration_secs")]
    pub processing_time: Duration,
    /// Whitespace-delimited word count.
    pub word_count: usize,
    /// Unicode scalar count.
    pub character_count: usize,
    pub sentences: Vec<String>,
    /// At most twenty entries, most frequent first.
    pub keywords: Vec<String>,
}

/// Flat report of the headline numbers of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub text_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub primary_emotion: EmotionType,
    pub emotion_intensity: f64,
    pub content_type: ContentType,
    pub difficulty: DifficultyLevel,
    pub reading_speed: f64,
    pub recommended_theme: String,
    pub confidence: f64,
    #[serde(with = "duration_secs")]
    pub processing_time: Duration,
    pub key_themes: Vec<String>,
    /// Top ten keywords.
    pub keywords: Vec<String>,
}

impl From<&AnalysisResult> for AnalysisSummary {
    fn from(result: &AnalysisResult) -> Self {
        let p = &result.profile;
        Self {
            text_length: result.character_count,
            word_count: result.word_count,
            sentence_count: result.sentences.len(),
            primary_emotion: p.emotion,
            emotion_intensity: p.emotion_intensity,
            content_type: p.content_type,
            difficulty: p.difficulty,
            reading_speed: p.reading_speed,
            recommended_theme: p.recommended_theme.clone(),
            confidence: p.confidence,
            processing_time: result.processing_time,
            key_themes: p.key_themes.clone(),
            keywords: result.keywords.iter().take(10).cloned().collect(),
        }
    }
}

/// Per-emotion scores covering the whole enumeration.
pub type EmotionDistribution = BTreeMap<EmotionType, f64>;

/// Per-content-type scores covering the whole enumeration.
pub type ContentDistribution = BTreeMap<ContentType, f64>;

/// Serialize a [`Duration`] as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
