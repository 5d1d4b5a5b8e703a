// SPDX-License-Identifier: MIT
//
// tinct — read the mood and genre of prose, then pick a theme to present it.
//
// This crate wires the two library crates together behind one facade:
//
//   tinct-analysis → emotion, genre, difficulty, keywords, recommended theme
//   tinct-theme    → colors, effects, typography for a profile + template
//
// A decoration request flows through:
//
//   text → ContentAnalyzer (cached) → ContentProfile
//        → preference override → ThemeGenerator (cached) → ThemeConfig
//
// Stylesheet rendering and document injection live outside this crate;
// they consume the serialized AnalysisResult and ThemeConfig records.

pub mod config;
pub mod error;
pub mod logging;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tinct_analysis::{
    AnalysisResult, AnalysisSummary, CacheStats, ContentAnalyzer, EmotionDetector, Trajectory,
};
use tinct_theme::{
    ColorScheme, ThemeCacheStats, ThemeConfig, ThemeGenerator, ThemeRegistry, VisualEffect,
};
use tracing::{debug, info};

pub use config::Config;
pub use error::{Error, Result};

// ---------------------------------------------------------------------------
// Requests + reports
// ---------------------------------------------------------------------------

/// One text to analyze and theme, with optional caller overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationRequest {
    pub text: String,
    /// Template id; the configured default when absent.
    pub template: Option<String>,
    /// Theme id that replaces the recommended theme.
    pub theme_preference: Option<String>,
    /// Colors used verbatim instead of generated ones.
    pub custom_colors: Option<ColorScheme>,
    /// Effects used verbatim instead of generated ones.
    pub custom_effects: Option<VisualEffect>,
    /// Overrides the configured cache default.
    pub use_cache: Option<bool>,
}

impl DecorationRequest {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Analysis plus the theme chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoration {
    pub analysis: AnalysisResult,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub total_requests: u64,
    /// Seconds.
    pub total_processing_time: f64,
    /// Running mean over requests.
    pub average_chars_per_second: f64,
    pub analysis_cache: CacheStats,
    pub theme_cache: ThemeCacheStats,
}

#[derive(Debug, Default)]
struct Counters {
    requests: u64,
    processing_time: Duration,
    avg_chars_per_second: f64,
}

impl Counters {
    #[allow(clippy::cast_precision_loss)]
    fn record(&mut self, result: &AnalysisResult) {
        self.requests += 1;
        self.processing_time += result.processing_time;

        let secs = result.processing_time.as_secs_f64();
        let cps = if secs > 0.0 {
            result.character_count as f64 / secs
        } else {
            0.0
        };
        let n = self.requests as f64;
        self.avg_chars_per_second = self.avg_chars_per_second.mul_add(n - 1.0, cps) / n;
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Analyzer and theme generator configured together.
///
/// All methods take `&self`; the caches and counters lock internally, so a
/// pipeline can be shared across threads.
#[derive(Debug)]
pub struct Pipeline {
    analyzer: ContentAnalyzer,
    generator: ThemeGenerator,
    use_cache: bool,
    segment_size: usize,
    default_template: String,
    counters: Mutex<Counters>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Pipeline {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let analysis = &config.analysis;
        let analyzer = ContentAnalyzer::new()
            .with_detector(EmotionDetector::with_backend(analysis.sentiment))
            .with_parallel(analysis.parallel);

        let registry = if config.theme.builtin_themes {
            ThemeRegistry::builtin()
        } else {
            ThemeRegistry::new()
        };

        info!(
            sentiment = analysis.sentiment.name(),
            parallel = analysis.parallel,
            themes = registry.len(),
            template = %config.theme.default_template,
            "pipeline ready"
        );

        Self {
            analyzer,
            generator: ThemeGenerator::with_registry(registry),
            use_cache: analysis.use_cache,
            segment_size: analysis.segment_size,
            default_template: config.theme.default_template.clone(),
            counters: Mutex::new(Counters::default()),
        }
    }

    #[must_use]
    pub const fn analyzer(&self) -> &ContentAnalyzer {
        &self.analyzer
    }

    #[must_use]
    pub const fn generator(&self) -> &ThemeGenerator {
        &self.generator
    }

    fn counters(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Analyze with the configured cache setting.
    #[must_use]
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyze_with(text, self.use_cache)
    }

    #[must_use]
    pub fn analyze_with(&self, text: &str, use_cache: bool) -> AnalysisResult {
        let result = self.analyzer.analyze(text, use_cache);
        self.counters().record(&result);
        result
    }

    /// One result per input, in input order.
    #[must_use]
    pub fn analyze_batch<S>(&self, texts: &[S]) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        let results = self.analyzer.analyze_batch(texts, self.use_cache);
        let mut counters = self.counters();
        for result in &results {
            counters.record(result);
        }
        results
    }

    #[must_use]
    pub fn summary(&self, result: &AnalysisResult) -> AnalysisSummary {
        self.analyzer.analysis_summary(result)
    }

    /// Emotion per window of the configured segment size.
    #[must_use]
    pub fn trajectory<'a>(&'a self, text: &'a str) -> Trajectory<'a> {
        self.analyzer.detector().trajectory(text, self.segment_size)
    }

    /// Analyze `request.text` and choose its theme.
    ///
    /// A `theme_preference` naming a registered theme is used as is;
    /// any other preference still replaces the recommended theme and
    /// steers color synthesis.
    ///
    /// # Errors
    ///
    /// [`Error::Theme`] when custom colors or effects are out of range.
    pub fn decorate(&self, request: &DecorationRequest) -> Result<Decoration> {
        let use_cache = request.use_cache.unwrap_or(self.use_cache);
        let mut analysis = self.analyze_with(&request.text, use_cache);
        let template = request
            .template
            .as_deref()
            .unwrap_or(&self.default_template);

        let preferred = request.theme_preference.as_deref().and_then(|id| {
            analysis.profile.override_theme(id);
            self.generator.named(id, template)
        });
        let profile = &analysis.profile;

        let theme = if let Some(colors) = &request.custom_colors {
            self.generator
                .custom_theme(profile, colors.clone(), request.custom_effects, template)?
        } else {
            let mut theme = preferred.unwrap_or_else(|| self.generator.generate(profile, template));
            if let Some(effects) = request.custom_effects {
                effects.validate()?;
                theme.effects = effects;
            }
            theme
        };

        debug!(
            theme = %theme.name,
            recommended = %profile.recommended_theme,
            template,
            "decorated"
        );
        Ok(Decoration { analysis, theme })
    }

    /// Register a theme under `id`; clears the theme cache.
    ///
    /// # Errors
    ///
    /// [`Error::Theme`] for a blank or taken id, or an invalid theme.
    pub fn register_theme(&mut self, id: impl Into<String>, theme: ThemeConfig) -> Result<()> {
        self.generator.register_theme(id, theme)?;
        Ok(())
    }

    #[must_use]
    pub fn performance_stats(&self) -> PerformanceStats {
        let counters = self.counters();
        PerformanceStats {
            total_requests: counters.requests,
            total_processing_time: counters.processing_time.as_secs_f64(),
            average_chars_per_second: counters.avg_chars_per_second,
            analysis_cache: self.analyzer.cache_stats(),
            theme_cache: self.generator.cache().stats(),
        }
    }

    /// Empty both caches. Counters are kept.
    pub fn clear_caches(&self) {
        self.analyzer.clear_cache();
        self.generator.cache().clear();
        info!("caches cleared");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tinct_analysis::{ContentType, EmotionType};
    use tinct_theme::{RAILWAY, ThemeError, TYPEWRITER, is_hex_color};

    const EXCITED: &str = "I'm so excited and happy about this amazing opportunity!";
    const LESSON: &str =
        "Let's learn about machine learning fundamentals and understand how neural networks work.";
    const REPORT: &str = "Our quarterly business results demonstrate strong growth in revenue.";

    fn serial() -> Pipeline {
        let mut config = Config::default();
        config.analysis.parallel = false;
        Pipeline::from_config(&config)
    }

    // ── Analysis ────────────────────────────────────────────────────

    #[test]
    fn scenarios_end_to_end() {
        let pipeline = Pipeline::default();
        let excited = pipeline.analyze(EXCITED).profile;
        assert!(matches!(excited.emotion, EmotionType::Happy | EmotionType::Excited));
        assert!(excited.emotion_intensity > 0.3);

        assert_eq!(pipeline.analyze(LESSON).profile.content_type, ContentType::Learning);
        assert_eq!(
            pipeline.analyze(REPORT).profile.content_type,
            ContentType::Professional
        );
    }

    #[test]
    fn batch_keeps_order_and_counts_requests() {
        let pipeline = Pipeline::default();
        let texts = [EXCITED, LESSON, REPORT];
        let results = pipeline.analyze_batch(&texts);
        for (result, text) in results.iter().zip(texts) {
            assert_eq!(result.text, text);
        }
        let stats = pipeline.performance_stats();
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.analysis_cache.entry_count, 3);
    }

    #[test]
    fn cache_setting_comes_from_config() {
        let mut config = Config::default();
        config.analysis.use_cache = false;
        let pipeline = Pipeline::from_config(&config);
        let _ = pipeline.analyze(LESSON);
        assert_eq!(pipeline.performance_stats().analysis_cache.entry_count, 0);
    }

    #[test]
    fn trajectory_uses_segment_size() {
        let mut config = Config::default();
        config.analysis.segment_size = 4;
        let pipeline = Pipeline::from_config(&config);
        // 12 words.
        let text = "I am so happy today. Then it turned sad and I cried.";
        assert_eq!(pipeline.trajectory(text).count(), 3);
    }

    #[test]
    fn summary_reports_sentences() {
        let pipeline = serial();
        let result = pipeline.analyze("First one. Second one!");
        assert_eq!(pipeline.summary(&result).sentence_count, 2);
    }

    // ── Decoration ──────────────────────────────────────────────────

    #[test]
    fn decorate_uses_default_template() {
        let pipeline = serial();
        let out = pipeline.decorate(&DecorationRequest::new(LESSON)).unwrap();
        assert!(out.theme.supports(TYPEWRITER));
        for value in out.theme.colors.as_array() {
            assert!(is_hex_color(value), "{value} is not #RRGGBB");
        }
        assert_eq!(out.analysis.text, LESSON);
    }

    #[test]
    fn preference_overrides_recommendation() {
        let pipeline = serial();
        let request = DecorationRequest {
            theme_preference: Some("emotional_serene".into()),
            template: Some(RAILWAY.into()),
            ..DecorationRequest::new(REPORT)
        };
        let out = pipeline.decorate(&request).unwrap();
        assert_eq!(out.analysis.profile.recommended_theme, "emotional_serene");
        assert_eq!(out.theme.name, "Emotional Serene");
        assert!(out.theme.supports(RAILWAY));
    }

    #[test]
    fn unknown_preference_still_produces_a_theme() {
        let mut config = Config::default();
        config.theme.builtin_themes = false;
        let pipeline = Pipeline::from_config(&config);
        let request = DecorationRequest {
            theme_preference: Some("does_not_exist".into()),
            ..DecorationRequest::new(EXCITED)
        };
        let out = pipeline.decorate(&request).unwrap();
        assert_eq!(out.analysis.profile.recommended_theme, "does_not_exist");
        assert_eq!(out.theme.validate(), Ok(()));
    }

    #[test]
    fn custom_colors_and_effects() {
        let pipeline = serial();
        let colors = ColorScheme::from_array([
            "#111111", "#222222", "#333333", "#444444", "#555555", "#666666",
        ]);
        let effects = VisualEffect {
            gradient_angle: 200,
            ..VisualEffect::default()
        };
        let request = DecorationRequest {
            custom_colors: Some(colors.clone()),
            custom_effects: Some(effects),
            ..DecorationRequest::new(EXCITED)
        };
        let out = pipeline.decorate(&request).unwrap();
        assert_eq!(out.theme.colors, colors);
        assert_eq!(out.theme.effects, effects);
        assert!(out.theme.name.starts_with("Custom "));
    }

    #[test]
    fn invalid_custom_effects_are_rejected() {
        let pipeline = serial();
        let request = DecorationRequest {
            custom_effects: Some(VisualEffect {
                shadow_intensity: 2.0,
                ..VisualEffect::default()
            }),
            ..DecorationRequest::new(REPORT)
        };
        let err = pipeline.decorate(&request).unwrap_err();
        assert!(matches!(
            err,
            Error::Theme(ThemeError::InvalidEffect { field: "shadow_intensity", .. })
        ));
    }

    #[test]
    fn request_deserializes_from_partial_json() {
        let request: DecorationRequest =
            serde_json::from_str(r#"{"text": "hi", "template": "scroll"}"#).unwrap();
        assert_eq!(request.template.as_deref(), Some("scroll"));
        assert!(request.custom_colors.is_none());
    }

    // ── Stats + caches ──────────────────────────────────────────────

    #[test]
    fn clear_caches_empties_both() {
        let pipeline = serial();
        pipeline.decorate(&DecorationRequest::new(LESSON)).unwrap();
        let before = pipeline.performance_stats();
        assert_eq!(before.analysis_cache.entry_count, 1);
        assert_eq!(before.theme_cache.entry_count, 1);

        pipeline.clear_caches();
        let after = pipeline.performance_stats();
        assert_eq!(after.analysis_cache.entry_count, 0);
        assert_eq!(after.theme_cache.entry_count, 0);
        assert_eq!(after.total_requests, 1);
    }

    #[test]
    fn running_average_is_a_mean() {
        let mut counters = Counters::default();
        let mut result = Pipeline::default().analyze_with("abcd", false);
        result.character_count = 100;

        result.processing_time = Duration::from_secs(1);
        counters.record(&result);
        result.processing_time = Duration::from_secs(2);
        counters.record(&result);

        assert_eq!(counters.requests, 2);
        assert!((counters.avg_chars_per_second - 75.0).abs() < 1e-9);
        assert_eq!(counters.processing_time, Duration::from_secs(3));
    }

    #[test]
    fn register_theme_rejects_duplicates() {
        let mut pipeline = serial();
        let theme = tinct_theme::builtin::builtin_theme("emotional_serene").unwrap();
        let err = pipeline.register_theme("emotional_serene", theme).unwrap_err();
        assert!(matches!(err, Error::Theme(ThemeError::DuplicateTheme(_))));
    }
}
