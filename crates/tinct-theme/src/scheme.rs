//! Theme records — the field set handed to stylesheet and document layers.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ThemeError;

// ---------------------------------------------------------------------------
// ColorScheme
// ---------------------------------------------------------------------------

/// Six `#RRGGBB` colors: two gradients plus accent and glow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary_start: String,
    pub primary_end: String,
    pub background_start: String,
    pub background_end: String,
    pub accent_color: String,
    pub glow_color: String,
}

impl ColorScheme {
    /// Field names in storage order.
    pub const ROLES: [&'static str; 6] = [
        "primary_start",
        "primary_end",
        "background_start",
        "background_end",
        "accent_color",
        "glow_color",
    ];

    /// Build from six colors in [`Self::ROLES`] order. Not validated.
    #[must_use]
    pub fn from_array(colors: [&str; 6]) -> Self {
        let [primary_start, primary_end, background_start, background_end, accent, glow] =
            colors.map(str::to_string);
        Self {
            primary_start,
            primary_end,
            background_start,
            background_end,
            accent_color: accent,
            glow_color: glow,
        }
    }

    /// Colors in [`Self::ROLES`] order.
    #[must_use]
    pub fn as_array(&self) -> [&str; 6] {
        [
            self.primary_start.as_str(),
            self.primary_end.as_str(),
            self.background_start.as_str(),
            self.background_end.as_str(),
            self.accent_color.as_str(),
            self.glow_color.as_str(),
        ]
    }

    /// Apply `f` to every color.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(&str) -> String) -> Self {
        let [a, b, c, d, e, g] = self.as_array();
        Self {
            primary_start: f(a),
            primary_end: f(b),
            background_start: f(c),
            background_end: f(d),
            accent_color: f(e),
            glow_color: f(g),
        }
    }

    /// Check every color is `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::InvalidColor`] naming the first offending role.
    pub fn validate(&self) -> Result<(), ThemeError> {
        self.parse().map(|_| ())
    }

    /// Parse every color.
    ///
    /// # Errors
    ///
    /// [`ThemeError::InvalidColor`] naming the first offending role.
    pub fn parse(&self) -> Result<[Color; 6], ThemeError> {
        let mut out = [Color::BLACK; 6];
        for ((slot, role), value) in out.iter_mut().zip(Self::ROLES).zip(self.as_array()) {
            *slot = Color::hex(value).ok_or_else(|| ThemeError::InvalidColor {
                role,
                value: value.to_string(),
            })?;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// VisualEffect
// ---------------------------------------------------------------------------

/// Animation and glow parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualEffect {
    /// In `[0, 1]`.
    pub glow_intensity: f64,
    /// Multiplier on the template's base speed, `> 0`.
    pub animation_speed: f64,
    /// Pixels, `>= 0`.
    pub blur_radius: f64,
    pub pulse_enabled: bool,
    /// Degrees, `[0, 360]`.
    pub gradient_angle: u16,
    pub shadow_enabled: bool,
    /// In `[0, 1]`.
    pub shadow_intensity: f64,
}

impl Default for VisualEffect {
    fn default() -> Self {
        Self {
            glow_intensity: 0.3,
            animation_speed: 1.0,
            blur_radius: 0.0,
            pulse_enabled: false,
            gradient_angle: 45,
            shadow_enabled: true,
            shadow_intensity: 0.5,
        }
    }
}

impl VisualEffect {
    /// Check every numeric field is within its documented range.
    ///
    /// # Errors
    ///
    /// [`ThemeError::InvalidEffect`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ThemeError> {
        let unit = 0.0..=1.0;
        let checks = [
            ("glow_intensity", self.glow_intensity, unit.contains(&self.glow_intensity)),
            (
                "animation_speed",
                self.animation_speed,
                self.animation_speed.is_finite() && self.animation_speed > 0.0,
            ),
            (
                "blur_radius",
                self.blur_radius,
                self.blur_radius.is_finite() && self.blur_radius >= 0.0,
            ),
            (
                "gradient_angle",
                f64::from(self.gradient_angle),
                self.gradient_angle <= 360,
            ),
            ("shadow_intensity", self.shadow_intensity, unit.contains(&self.shadow_intensity)),
        ];
        match checks.into_iter().find(|&(_, _, ok)| !ok) {
            Some((field, value, _)) => Err(ThemeError::InvalidEffect { field, value }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Typography
// ---------------------------------------------------------------------------

/// CSS typography values, kept as strings so they drop straight into a
/// stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub font_weight: String,
    pub letter_spacing: String,
    pub line_height: String,
    pub text_transform: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_weight: "normal".into(),
            letter_spacing: "normal".into(),
            line_height: "1.6".into(),
            text_transform: "none".into(),
        }
    }
}

impl Typography {
    /// Looser leading for study material.
    #[must_use]
    pub fn learning() -> Self {
        Self {
            letter_spacing: "0.02em".into(),
            line_height: "1.8".into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn professional() -> Self {
        Self {
            font_weight: "500".into(),
            letter_spacing: "0.01em".into(),
            ..Self::default()
        }
    }

    /// Light and airy.
    #[must_use]
    pub fn creative() -> Self {
        Self {
            font_weight: "300".into(),
            letter_spacing: "0.05em".into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// ThemeConfig
// ---------------------------------------------------------------------------

/// A complete, named theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    pub description: String,
    pub colors: ColorScheme,
    pub effects: VisualEffect,
    #[serde(default)]
    pub typography: Typography,
    /// Template identifiers this theme is known to work with.
    #[serde(default)]
    pub compatibility: Vec<String>,
}

impl ThemeConfig {
    #[must_use]
    pub fn supports(&self, template: &str) -> bool {
        self.compatibility.iter().any(|t| t == template)
    }

    /// Record `template` as compatible; no-op when already present.
    pub fn add_compatibility(&mut self, template: &str) {
        if !self.supports(template) {
            self.compatibility.push(template.to_string());
        }
    }

    /// Validate colors and effects.
    ///
    /// # Errors
    ///
    /// The first [`ThemeError`] found.
    pub fn validate(&self) -> Result<(), ThemeError> {
        self.colors.validate()?;
        self.effects.validate()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
