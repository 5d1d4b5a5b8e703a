//! # tinct-analysis — Reading the Mood and Genre of Prose
//!
//! Derives a [`ContentProfile`] from free text: dominant emotion and its
//! intensity, content genre and confidence, reading difficulty, reading
//! speed, key themes, and a recommended theme identifier.
//!
//! # Architecture
//!
//! ```text
//! raw text
//!     │
//!     ├──────────────────────────┐
//!     ▼                          ▼
//! emotion.rs:  keyword +      classify.rs: keyword + pattern
//!   modifier + sentiment        scores, structural boosts,
//!   (sentiment.rs)              complexity metrics
//!     │                          │
//!     └────────────┬─────────────┘
//!                  ▼
//! analyzer.rs: difficulty, reading speed, key themes, keywords,
//!              recommended theme  ──►  cache.rs (exact-text)
//!                  │
//!                  ▼
//!           AnalysisResult (model.rs)
//! ```
//!
//! The detector and the classifier are independent and run side by side on
//! the rayon pool; batches fan out the same way and keep input order.
//!
//! Nothing here fails on odd input. Empty text yields the neutral /
//! professional / zero-confidence profile, and a sentiment backend that
//! cannot score a text is replaced by neutral multipliers.

// Scores are ratios of small token counts.
#![allow(clippy::cast_precision_loss)]
// Keyword tables are long literal lists.
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod cache;
pub mod classify;
pub mod emotion;
pub mod model;
pub mod sentiment;
pub mod text;

pub use analyzer::{ContentAnalyzer, extract_keywords, key_themes, recommend_theme};
pub use cache::{AnalysisCache, CacheStats};
pub use classify::{Complexity, ContentClassifier, ContentReading, StructureSignals};
pub use emotion::{EmotionDetector, EmotionReading, EmotionSegment, Trajectory};
pub use model::{
    AnalysisResult, AnalysisSummary, ContentDistribution, ContentProfile, ContentType,
    DifficultyLevel, EmotionDistribution, EmotionType,
};
pub use sentiment::{
    KeywordRatioSentiment, LexicalSentiment, Sentiment, SentimentBackend, SentimentError,
    SentimentStrategy,
};
