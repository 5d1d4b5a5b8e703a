//! Visual effects and typography derived from a profile.
//!
//! Effects start from one of four intensity presets, then content type
//! scales speed and glow, then the animation template gets the last word.

use std::fmt;

use serde::{Deserialize, Serialize};
use tinct_analysis::{ContentProfile, ContentType, DifficultyLevel};

use crate::scheme::{Typography, VisualEffect};

/// Character-by-character reveal.
pub const TYPEWRITER: &str = "typewriter";
/// Horizontal scroll; gradients run left to right.
pub const RAILWAY: &str = "railway";
/// Vertical scroll.
pub const SCROLL: &str = "scroll";

/// Known template identifiers. Others are accepted and left unadjusted.
pub const TEMPLATES: [&str; 3] = [TYPEWRITER, RAILWAY, SCROLL];

// ---------------------------------------------------------------------------
// EffectPreset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectPreset {
    Subtle,
    Moderate,
    Vibrant,
    Energetic,
}

impl EffectPreset {
    pub const ALL: [Self; 4] = [Self::Subtle, Self::Moderate, Self::Vibrant, Self::Energetic];

    /// Thresholds are strict: exactly 0.3 is still subtle.
    #[must_use]
    pub fn for_intensity(intensity: f64) -> Self {
        if intensity > 0.8 {
            Self::Energetic
        } else if intensity > 0.6 {
            Self::Vibrant
        } else if intensity > 0.3 {
            Self::Moderate
        } else {
            Self::Subtle
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Subtle => "subtle",
            Self::Moderate => "moderate",
            Self::Vibrant => "vibrant",
            Self::Energetic => "energetic",
        }
    }

    #[must_use]
    pub const fn effect(self) -> VisualEffect {
        let (glow, speed, blur, pulse, angle, shadow) = match self {
            Self::Subtle => (0.2, 1.0, 0.0, false, 45, 0.3),
            Self::Moderate => (0.4, 1.0, 0.5, true, 90, 0.5),
            Self::Vibrant => (0.6, 1.2, 1.0, true, 135, 0.7),
            Self::Energetic => (0.8, 1.5, 1.5, true, 180, 0.8),
        };
        VisualEffect {
            glow_intensity: glow,
            animation_speed: speed,
            blur_radius: blur,
            pulse_enabled: pulse,
            gradient_angle: angle,
            shadow_enabled: true,
            shadow_intensity: shadow,
        }
    }
}

impl fmt::Display for EffectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Effects for `profile` rendered with `template`.
#[must_use]
pub fn generate_effects(profile: &ContentProfile, template: &str) -> VisualEffect {
    let mut effect = EffectPreset::for_intensity(profile.emotion_intensity).effect();

    match profile.content_type {
        ContentType::Learning => {
            effect.animation_speed *= 0.8;
            effect.glow_intensity *= 0.9;
        }
        ContentType::Professional => {
            effect.animation_speed *= 0.7;
            effect.glow_intensity *= 0.6;
            effect.pulse_enabled = false;
        }
        ContentType::Entertainment => {
            effect.animation_speed *= 1.2;
            effect.glow_intensity = (effect.glow_intensity * 1.1).min(1.0);
        }
        ContentType::Narrative | ContentType::Technical | ContentType::Creative => {}
    }

    match template {
        RAILWAY => effect.gradient_angle = 0,
        SCROLL => effect.animation_speed *= 0.8,
        _ => {}
    }

    effect
}

/// Typography by content type, then difficulty. Difficulty overrides any
/// field both touch.
#[must_use]
pub fn typography(profile: &ContentProfile) -> Typography {
    let mut t = match profile.content_type {
        ContentType::Professional => Typography::professional(),
        ContentType::Learning => Typography::learning(),
        ContentType::Creative => Typography::creative(),
        ContentType::Entertainment | ContentType::Narrative | ContentType::Technical => {
            Typography::default()
        }
    };

    match profile.difficulty {
        DifficultyLevel::Expert => {
            t.font_weight = "600".into();
            t.letter_spacing = "0.01em".into();
        }
        DifficultyLevel::Easy => {
            t.font_weight = "400".into();
            t.letter_spacing = "0.03em".into();
        }
        DifficultyLevel::Medium | DifficultyLevel::Hard => {}
    }

    t
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
