//! Emotion-driven color synthesis and profile adjustments.
//!
//! Blending and adjustments happen in OKLCH so lightness and chroma move
//! independently; results are gamut-mapped back to sRGB before hex output.

use tinct_analysis::{ContentType, DifficultyLevel, EmotionType};

use crate::builtin::builtin_palette;
use crate::color::Color;
use crate::scheme::ColorScheme;

const HAPPY: [&str; 6] = ["#FFD93D", "#FF6B6B", "#74B9FF", "#0984E3", "#00B894", "#FFD93D"];
const EXCITED: [&str; 6] = ["#FF6B6B", "#4ECDC4", "#A29BFE", "#6C5CE7", "#FDCB6E", "#FF6B6B"];
const SERENE: [&str; 6] = ["#81ECEC", "#74B9FF", "#2D3436", "#636E72", "#00B894", "#81ECEC"];
const CONTEMPLATIVE: [&str; 6] = ["#A29BFE", "#6C5CE7", "#2D3436", "#636E72", "#74B9FF", "#A29BFE"];
const ANGRY: [&str; 6] = ["#E17055", "#D63031", "#2D3436", "#636E72", "#FDCB6E", "#E17055"];
const MUTED: [&str; 6] = ["#636E72", "#B2BEC3", "#2D3436", "#636E72", "#74B9FF", "#636E72"];
const SURPRISED: [&str; 6] = ["#FDCB6E", "#E17055", "#6C5CE7", "#A29BFE", "#FF7675", "#FDCB6E"];
const MINIMAL: [&str; 6] = ["#2F3542", "#57606F", "#F8F9FA", "#E9ECEF", "#3742FA", "#2F3542"];

/// Intensity above which chroma is boosted.
pub const VIVID_THRESHOLD: f64 = 0.7;
/// Intensity below which chroma is muted.
pub const MUTED_THRESHOLD: f64 = 0.3;

const VIVID_CHROMA: f64 = 1.2;
const MUTED_CHROMA: f64 = 0.8;
const DIFFICULTY_LIGHTNESS: f64 = 0.1;

/// Base colors for an emotion, in [`ColorScheme::ROLES`] order.
#[must_use]
pub const fn emotion_palette(emotion: EmotionType) -> [&'static str; 6] {
    match emotion {
        EmotionType::Happy => HAPPY,
        EmotionType::Excited => EXCITED,
        EmotionType::Calm => SERENE,
        EmotionType::Sad => CONTEMPLATIVE,
        EmotionType::Angry => ANGRY,
        EmotionType::Fearful => MUTED,
        EmotionType::Surprised => SURPRISED,
        EmotionType::Neutral => MINIMAL,
    }
}

/// Scheme for an emotion, blended half way towards the family base palette
/// when the content is learning or professional material.
#[must_use]
pub fn synthesize(emotion: EmotionType, content_type: ContentType) -> ColorScheme {
    let scheme = ColorScheme::from_array(emotion_palette(emotion));
    let base = match content_type {
        ContentType::Learning => builtin_palette("learning_focused"),
        ContentType::Professional => builtin_palette("professional_minimal"),
        _ => None,
    };
    let Some(base) = base else {
        return scheme;
    };

    let mut others = base.as_array().into_iter();
    scheme.map(|color| match others.next() {
        Some(other) => blend(color, other),
        None => color.to_string(),
    })
}

/// Even OKLCH mix of two hex colors. Returns `a` untouched if either side
/// does not parse.
fn blend(a: &str, b: &str) -> String {
    match (Color::hex(a), Color::hex(b)) {
        (Some(x), Some(y)) => x.mix(y, 0.5).to_gamut().to_hex(),
        _ => a.to_string(),
    }
}

/// Saturate or mute by emotion intensity, then lighten or darken by
/// difficulty.
///
/// Colors that need no change keep their original spelling, so a
/// mid-intensity, medium-difficulty profile returns `scheme` unchanged.
#[must_use]
pub fn adjust(scheme: &ColorScheme, intensity: f64, difficulty: DifficultyLevel) -> ColorScheme {
    let chroma = if intensity > VIVID_THRESHOLD {
        Some(VIVID_CHROMA)
    } else if intensity < MUTED_THRESHOLD {
        Some(MUTED_CHROMA)
    } else {
        None
    };
    let lightness = match difficulty {
        DifficultyLevel::Expert => Some(-DIFFICULTY_LIGHTNESS),
        DifficultyLevel::Easy => Some(DIFFICULTY_LIGHTNESS),
        DifficultyLevel::Medium | DifficultyLevel::Hard => None,
    };
    if chroma.is_none() && lightness.is_none() {
        return scheme.clone();
    }

    let (chroma, lightness) = (chroma.unwrap_or(1.0), lightness.unwrap_or(0.0));
    scheme.map(|hex| {
        Color::hex(hex).map_or_else(
            || hex.to_string(),
            |c| c.scale_chroma(chroma).lighten(lightness).to_gamut().to_hex(),
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lightness(hex: &str) -> f64 {
        Color::hex(hex).unwrap().l
    }

    // ── Synthesis ───────────────────────────────────────────────────

    #[test]
    fn shared_palettes() {
        assert_eq!(
            ColorScheme::from_array(emotion_palette(EmotionType::Calm)),
            builtin_palette("emotional_serene").unwrap()
        );
        assert_eq!(
            ColorScheme::from_array(emotion_palette(EmotionType::Neutral)),
            builtin_palette("professional_minimal").unwrap()
        );
        assert_eq!(
            ColorScheme::from_array(emotion_palette(EmotionType::Sad)),
            builtin_palette("emotional_contemplative").unwrap()
        );
    }

    #[test]
    fn narrative_uses_raw_emotion_palette() {
        let scheme = synthesize(EmotionType::Angry, ContentType::Narrative);
        assert_eq!(scheme, ColorScheme::from_array(ANGRY));
    }

    #[test]
    fn learning_blends_towards_focused() {
        let scheme = synthesize(EmotionType::Happy, ContentType::Learning);
        assert_eq!(scheme.validate(), Ok(()));
        assert_ne!(scheme.primary_start, HAPPY[0]);

        // Happy's background starts mid-light; focused starts near black.
        let mixed = lightness(&scheme.background_start);
        assert!(mixed < lightness(HAPPY[2]));
        assert!(mixed > lightness("#000428"));
    }

    #[test]
    fn blending_identical_colors_is_stable() {
        let scheme = synthesize(EmotionType::Neutral, ContentType::Professional);
        assert_eq!(scheme.validate(), Ok(()));
        for (got, want) in scheme.as_array().into_iter().zip(MINIMAL) {
            let (g, w) = (Color::hex(got).unwrap(), Color::hex(want).unwrap());
            assert!((g.l - w.l).abs() < 0.01, "{got} drifted from {want}");
        }
    }

    // ── Adjustment ──────────────────────────────────────────────────

    #[test]
    fn neutral_adjustment_keeps_spelling() {
        let scheme = builtin_palette("learning_focused").unwrap();
        assert_eq!(adjust(&scheme, 0.5, DifficultyLevel::Medium), scheme);
        assert_eq!(adjust(&scheme, 0.7, DifficultyLevel::Hard), scheme);
    }

    #[test]
    fn intensity_moves_chroma() {
        let scheme = ColorScheme::from_array(EXCITED);
        let base = Color::hex(&scheme.accent_color).unwrap().c;

        let muted = adjust(&scheme, 0.1, DifficultyLevel::Medium);
        assert!(Color::hex(&muted.accent_color).unwrap().c < base);

        let vivid = adjust(&scheme, 0.9, DifficultyLevel::Medium);
        assert!(Color::hex(&vivid.accent_color).unwrap().c >= base - 5e-3);
        assert_eq!(vivid.validate(), Ok(()));
    }

    #[test]
    fn difficulty_moves_lightness() {
        let scheme = ColorScheme::from_array(SERENE);
        let base = lightness(&scheme.primary_end);

        let expert = adjust(&scheme, 0.5, DifficultyLevel::Expert);
        assert!(lightness(&expert.primary_end) < base);

        let easy = adjust(&scheme, 0.5, DifficultyLevel::Easy);
        assert!(lightness(&easy.primary_end) > base);
    }

    #[test]
    fn unparseable_colors_pass_through() {
        let mut scheme = ColorScheme::from_array(SERENE);
        scheme.glow_color = "glow".into();
        let adjusted = adjust(&scheme, 0.9, DifficultyLevel::Expert);
        assert_eq!(adjusted.glow_color, "glow");
        assert_ne!(adjusted.primary_start, scheme.primary_start);
    }
}
