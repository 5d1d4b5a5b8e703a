//! Profile → [`ThemeConfig`].
//!
//! ```text
//! profile, template
//!     │
//!     ├── ThemeCache hit ─────────────────────────────► cached config
//!     │
//!     ├── registry.find_for_profile() ─ first match ──► registered theme
//!     │
//!     └── synthesis:
//!           colors     registry[recommended] | builtin palette | emotion table
//!                      then intensity/difficulty adjustment (palette.rs)
//!           effects    intensity preset, content, template (effects.rs)
//!           typography content type, difficulty (effects.rs)
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tinct_analysis::{ContentProfile, ContentType, DifficultyLevel, EmotionType};
use tracing::{debug, trace};

use crate::builtin::builtin_palette;
use crate::effects;
use crate::error::ThemeError;
use crate::palette;
use crate::registry::ThemeRegistry;
use crate::scheme::{ColorScheme, ThemeConfig, Typography, VisualEffect};

/// Intensity above which a theme name says "High Intensity".
pub const HIGH_INTENSITY: f64 = 0.6;

// ---------------------------------------------------------------------------
// ThemeCache
// ---------------------------------------------------------------------------

/// Profile fields a generated theme depends on.
///
/// Intensity is bucketed to tenths so nearby profiles share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeCacheKey {
    pub emotion: EmotionType,
    pub content_type: ContentType,
    pub difficulty: DifficultyLevel,
    pub template: String,
    pub intensity_tenths: u8,
}

impl ThemeCacheKey {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(profile: &ContentProfile, template: &str) -> Self {
        Self {
            emotion: profile.emotion,
            content_type: profile.content_type,
            difficulty: profile.difficulty,
            template: template.to_string(),
            // Clamped to [0, 10] before the cast.
            intensity_tenths: (profile.emotion_intensity.clamp(0.0, 1.0) * 10.0).round() as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThemeCacheStats {
    pub entry_count: usize,
    /// Distinct templates among cached entries.
    pub template_count: usize,
}

/// Thread-safe map of generated themes. Entries never expire.
#[derive(Debug, Default)]
pub struct ThemeCache {
    entries: Mutex<HashMap<ThemeCacheKey, ThemeConfig>>,
}

impl ThemeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ThemeCacheKey, ThemeConfig>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &ThemeCacheKey) -> Option<ThemeConfig> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: ThemeCacheKey, theme: ThemeConfig) {
        self.lock().insert(key, theme);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> ThemeCacheStats {
        let entries = self.lock();
        let templates: HashSet<&str> = entries.keys().map(|k| k.template.as_str()).collect();
        ThemeCacheStats {
            entry_count: entries.len(),
            template_count: templates.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeGenerator
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ThemeGenerator {
    registry: ThemeRegistry,
    cache: Arc<ThemeCache>,
}

impl Default for ThemeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeGenerator {
    /// Generator over the builtin themes with a private cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ThemeRegistry::builtin())
    }

    #[must_use]
    pub fn with_registry(registry: ThemeRegistry) -> Self {
        Self {
            registry,
            cache: Arc::new(ThemeCache::new()),
        }
    }

    /// Share `cache` with other owners.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ThemeCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ThemeCache> {
        &self.cache
    }

    /// Register a theme and drop every cached result, since any of them
    /// may now resolve differently.
    ///
    /// # Errors
    ///
    /// See [`ThemeRegistry::insert`].
    pub fn register_theme(
        &mut self,
        id: impl Into<String>,
        theme: ThemeConfig,
    ) -> Result<(), ThemeError> {
        self.registry.insert(id, theme)?;
        self.cache.clear();
        Ok(())
    }

    /// Theme for `profile` rendered with `template`.
    ///
    /// Never fails: an unknown `recommended_theme` or an empty registry
    /// falls through to synthesis. The result always lists `template` in
    /// its compatibility.
    #[must_use]
    pub fn generate(&self, profile: &ContentProfile, template: &str) -> ThemeConfig {
        let key = ThemeCacheKey::new(profile, template);
        if let Some(mut theme) = self.cache.get(&key) {
            debug!(theme = %theme.name, template, "theme cache hit");
            theme.add_compatibility(template);
            return theme;
        }

        let predefined = self
            .registry
            .find_for_profile(profile)
            .first()
            .and_then(|&id| {
                debug!(id, template, "predefined theme selected");
                self.named(id, template)
            });
        let theme = predefined.unwrap_or_else(|| self.synthesize(profile, template));

        self.cache.insert(key, theme.clone());
        theme
    }

    /// Registered theme `id`, with `template` added to its compatibility.
    #[must_use]
    pub fn named(&self, id: &str, template: &str) -> Option<ThemeConfig> {
        let mut theme = self.registry.get(id)?.clone();
        theme.add_compatibility(template);
        Some(theme)
    }

    fn synthesize(&self, profile: &ContentProfile, template: &str) -> ThemeConfig {
        debug!(
            emotion = %profile.emotion,
            content_type = %profile.content_type,
            template,
            "synthesizing theme"
        );
        ThemeConfig {
            name: theme_name(profile),
            description: theme_description(profile),
            colors: self.generate_color_scheme(profile),
            effects: effects::generate_effects(profile, template),
            typography: effects::typography(profile),
            compatibility: vec![template.to_string()],
        }
    }

    /// Colors for `profile`, adjusted for intensity and difficulty.
    ///
    /// The base scheme is the registered theme named by
    /// `recommended_theme`, else the builtin palette of that name, else
    /// the emotion table.
    #[must_use]
    pub fn generate_color_scheme(&self, profile: &ContentProfile) -> ColorScheme {
        let wanted = profile.recommended_theme.as_str();
        let base = if let Some(theme) = self.registry.get(wanted) {
            trace!(theme = wanted, "colors from registry");
            theme.colors.clone()
        } else if let Some(colors) = builtin_palette(wanted) {
            trace!(theme = wanted, "colors from builtin palette");
            colors
        } else {
            trace!(theme = wanted, "no palette by that name, using emotion table");
            palette::synthesize(profile.emotion, profile.content_type)
        };
        palette::adjust(&base, profile.emotion_intensity, profile.difficulty)
    }

    #[must_use]
    pub fn generate_effects(&self, profile: &ContentProfile, template: &str) -> VisualEffect {
        effects::generate_effects(profile, template)
    }

    #[must_use]
    pub fn typography(&self, profile: &ContentProfile) -> Typography {
        effects::typography(profile)
    }

    /// Theme built around caller-supplied colors. Effects default to the
    /// generated ones. Not cached.
    ///
    /// # Errors
    ///
    /// [`ThemeError::InvalidColor`] or [`ThemeError::InvalidEffect`] when
    /// the supplied values are out of range.
    pub fn custom_theme(
        &self,
        profile: &ContentProfile,
        colors: ColorScheme,
        effects: Option<VisualEffect>,
        template: &str,
    ) -> Result<ThemeConfig, ThemeError> {
        let theme = ThemeConfig {
            name: format!("Custom {} Theme", capitalize(profile.emotion.name())),
            description: format!("Custom theme for {} content", profile.content_type),
            colors,
            effects: effects.unwrap_or_else(|| self.generate_effects(profile, template)),
            typography: self.typography(profile),
            compatibility: vec![template.to_string()],
        };
        theme.validate()?;
        Ok(theme)
    }
}

/// `"Happy Learning (High Intensity)"`.
#[must_use]
pub fn theme_name(profile: &ContentProfile) -> String {
    let level = if profile.emotion_intensity > HIGH_INTENSITY {
        "High"
    } else {
        "Low"
    };
    format!(
        "{} {} ({level} Intensity)",
        capitalize(profile.emotion.name()),
        capitalize(profile.content_type.name()),
    )
}

#[must_use]
pub fn theme_description(profile: &ContentProfile) -> String {
    format!(
        "A {} theme optimized for {} content with {} difficulty level and {:.1} emotion intensity.",
        profile.emotion, profile.content_type, profile.difficulty, profile.emotion_intensity,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::is_hex_color;
    use crate::effects::{RAILWAY, TYPEWRITER};
    use pretty_assertions::assert_eq;

    fn profile(
        emotion: EmotionType,
        content_type: ContentType,
        difficulty: DifficultyLevel,
        intensity: f64,
        recommended: &str,
    ) -> ContentProfile {
        ContentProfile {
            emotion,
            content_type,
            difficulty,
            emotion_intensity: intensity,
            reading_speed: 250.0,
            key_themes: Vec::new(),
            recommended_theme: recommended.into(),
            confidence: 0.8,
        }
    }

    fn happy_learning() -> ContentProfile {
        profile(
            EmotionType::Happy,
            ContentType::Learning,
            DifficultyLevel::Medium,
            0.7,
            "learning_energetic",
        )
    }

    fn assert_hex_colors(theme: &ThemeConfig) {
        for (role, value) in ColorScheme::ROLES.iter().zip(theme.colors.as_array()) {
            assert!(is_hex_color(value), "{role} = {value} is not #RRGGBB");
        }
    }

    // ── Generation ──────────────────────────────────────────────────

    #[test]
    fn happy_learning_typewriter_theme() {
        let theme = ThemeGenerator::new().generate(&happy_learning(), TYPEWRITER);
        assert!(theme.supports(TYPEWRITER));
        assert_hex_colors(&theme);
        assert_eq!(theme.name, "Learning Energetic");
    }

    #[test]
    fn happy_learning_synthesized_without_registry() {
        let generator = ThemeGenerator::with_registry(ThemeRegistry::new());
        let theme = generator.generate(&happy_learning(), TYPEWRITER);
        assert_eq!(theme.compatibility, vec![TYPEWRITER]);
        assert_hex_colors(&theme);
        // 0.7 is not above the vivid threshold and medium needs no shift.
        assert_eq!(theme.colors, builtin_palette("learning_energetic").unwrap());
        assert_eq!(theme.name, "Happy Learning (High Intensity)");
    }

    #[test]
    fn predefined_theme_gains_template() {
        let theme = ThemeGenerator::new().generate(&happy_learning(), RAILWAY);
        assert_eq!(theme.compatibility, vec![TYPEWRITER, RAILWAY]);
    }

    #[test]
    fn unknown_recommendation_falls_back_to_emotion_table() {
        let generator = ThemeGenerator::with_registry(ThemeRegistry::new());
        let p = profile(
            EmotionType::Angry,
            ContentType::Narrative,
            DifficultyLevel::Hard,
            0.5,
            "no_such_theme",
        );
        let colors = generator.generate_color_scheme(&p);
        assert_eq!(colors, ColorScheme::from_array(palette::emotion_palette(EmotionType::Angry)));
    }

    #[test]
    fn registered_theme_wins_over_builtin_palette() {
        let mut registry = ThemeRegistry::new();
        let mut custom = crate::builtin::builtin_theme("emotional_serene").unwrap();
        custom.colors.accent_color = "#123456".into();
        registry.insert("learning_energetic", custom).unwrap();

        let generator = ThemeGenerator::with_registry(registry);
        let colors = generator.generate_color_scheme(&happy_learning());
        assert_eq!(colors.accent_color, "#123456");
    }

    #[test]
    fn synthesized_effects_follow_template() {
        let generator = ThemeGenerator::with_registry(ThemeRegistry::new());
        let p = profile(
            EmotionType::Excited,
            ContentType::Entertainment,
            DifficultyLevel::Easy,
            0.9,
            "professional_positive",
        );
        let theme = generator.generate(&p, RAILWAY);
        assert_eq!(theme.effects.gradient_angle, 0);
        assert_eq!(theme.typography.font_weight, "400");
        assert_eq!(theme.validate(), Ok(()));
    }

    #[test]
    fn named_adds_template() {
        let generator = ThemeGenerator::new();
        let theme = generator.named("emotional_serene", "scroll").unwrap();
        assert_eq!(theme.compatibility, vec![TYPEWRITER, "scroll"]);
        assert!(generator.named("missing", TYPEWRITER).is_none());
    }

    // ── Cache ───────────────────────────────────────────────────────

    #[test]
    fn generate_caches_by_profile_and_template() {
        let generator = ThemeGenerator::new();
        let p = happy_learning();
        let first = generator.generate(&p, TYPEWRITER);
        let second = generator.generate(&p, TYPEWRITER);
        assert_eq!(first, second);
        assert_eq!(generator.cache().len(), 1);

        let railway = generator.generate(&p, RAILWAY);
        assert!(railway.supports(RAILWAY));
        let stats = generator.cache().stats();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.template_count, 2);
    }

    #[test]
    fn nearby_intensities_share_an_entry() {
        let a = ThemeCacheKey::new(&happy_learning(), TYPEWRITER);
        let mut p = happy_learning();
        p.emotion_intensity = 0.72;
        assert_eq!(a, ThemeCacheKey::new(&p, TYPEWRITER));
        p.emotion_intensity = 0.76;
        assert_ne!(a, ThemeCacheKey::new(&p, TYPEWRITER));
    }

    #[test]
    fn registering_clears_cache() {
        let mut generator = ThemeGenerator::new();
        let _theme = generator.generate(&happy_learning(), TYPEWRITER);
        assert!(!generator.cache().is_empty());

        let theme = crate::builtin::builtin_theme("emotional_serene").unwrap();
        generator.register_theme("midnight", theme).unwrap();
        assert!(generator.cache().is_empty());
    }

    #[test]
    fn shared_cache_is_visible_to_both_owners() {
        let cache = Arc::new(ThemeCache::new());
        let a = ThemeGenerator::new().with_cache(Arc::clone(&cache));
        let _theme = a.generate(&happy_learning(), TYPEWRITER);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(a.cache().is_empty());
    }

    // ── Custom themes + naming ──────────────────────────────────────

    #[test]
    fn custom_theme_validates_colors() {
        let generator = ThemeGenerator::new();
        let mut colors = builtin_palette("emotional_vibrant").unwrap();
        let ok = generator
            .custom_theme(&happy_learning(), colors.clone(), None, RAILWAY)
            .unwrap();
        assert_eq!(ok.name, "Custom Happy Theme");
        assert_eq!(ok.description, "Custom theme for learning content");
        assert_eq!(ok.compatibility, vec![RAILWAY]);
        assert_eq!(ok.effects.gradient_angle, 0);

        colors.primary_end = "red".into();
        assert!(matches!(
            generator.custom_theme(&happy_learning(), colors, None, RAILWAY),
            Err(ThemeError::InvalidColor { role: "primary_end", .. })
        ));
    }

    #[test]
    fn custom_theme_keeps_supplied_effects() {
        let effect = VisualEffect {
            pulse_enabled: true,
            gradient_angle: 270,
            ..VisualEffect::default()
        };
        let theme = ThemeGenerator::new()
            .custom_theme(
                &happy_learning(),
                builtin_palette("learning_focused").unwrap(),
                Some(effect),
                TYPEWRITER,
            )
            .unwrap();
        assert_eq!(theme.effects, effect);
    }

    #[test]
    fn names_and_descriptions() {
        let p = profile(
            EmotionType::Calm,
            ContentType::Technical,
            DifficultyLevel::Expert,
            0.3,
            "",
        );
        assert_eq!(theme_name(&p), "Calm Technical (Low Intensity)");
        assert_eq!(
            theme_description(&p),
            "A calm theme optimized for technical content with expert difficulty level \
             and 0.3 emotion intensity."
        );
    }
}
