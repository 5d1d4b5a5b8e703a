//! # tinct-theme — Themes From Content Profiles
//!
//! Turns a [`ContentProfile`](tinct_analysis::ContentProfile) and an
//! animation template into a [`ThemeConfig`]: six gradient/accent colors,
//! glow and motion effects, typography, and the templates the theme is
//! known to suit.
//!
//! # Architecture
//!
//! ```text
//! ContentProfile + template
//!     │
//!     ▼
//! generator.rs: ThemeCache lookup
//!     │
//!     ├──► registry.rs: predefined theme matched by content type + emotion
//!     │        (builtin.rs preloads the named presets)
//!     │
//!     └──► synthesis
//!            palette.rs: emotion table, family blend, intensity/difficulty
//!            effects.rs: intensity preset, content and template tweaks
//!     │
//!     ▼
//! scheme.rs: ThemeConfig { ColorScheme, VisualEffect, Typography }
//! ```
//!
//! # Color Space
//!
//! Blends and adjustments happen in OKLCH (color.rs). Every color leaves the
//! crate as an uppercase or caller-supplied `#RRGGBB` string inside sRGB.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::module_name_repetitions)]

pub mod builtin;
pub mod color;
pub mod effects;
pub mod error;
pub mod generator;
pub mod palette;
pub mod registry;
pub mod scheme;

pub use color::{Color, is_hex_color};
pub use effects::{EffectPreset, RAILWAY, SCROLL, TEMPLATES, TYPEWRITER};
pub use error::ThemeError;
pub use generator::{ThemeCache, ThemeCacheKey, ThemeCacheStats, ThemeGenerator};
pub use registry::{ThemeCategory, ThemeInfo, ThemeRegistry};
pub use scheme::{ColorScheme, ThemeConfig, Typography, VisualEffect};
