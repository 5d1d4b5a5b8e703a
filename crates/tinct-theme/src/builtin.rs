//! Named preset themes, the identifiers the analyzer recommends.
//!
//! Identifiers are `{family}_{variant}`: the family picks typography and the
//! variant picks an effect preset. Colors are listed in
//! [`ColorScheme::ROLES`] order.

use crate::effects::EffectPreset;
use crate::scheme::{ColorScheme, ThemeConfig, Typography};

struct Builtin {
    name: &'static str,
    description: &'static str,
    colors: [&'static str; 6],
    preset: EffectPreset,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "learning_focused",
        description: "Deep blue field with green highlights for sustained study.",
        colors: ["#4A90E2", "#7ED321", "#000428", "#004e92", "#50E3C2", "#4A90E2"],
        preset: EffectPreset::Subtle,
    },
    Builtin {
        name: "learning_energetic",
        description: "Coral and teal over a forest gradient for upbeat lessons.",
        colors: ["#FF6B6B", "#4ECDC4", "#134E5E", "#71B280", "#45B7D1", "#FF6B6B"],
        preset: EffectPreset::Vibrant,
    },
    Builtin {
        name: "learning_supportive",
        description: "Soft greens on slate for difficult or discouraging material.",
        colors: ["#A8E6CF", "#88D8A3", "#2C3E50", "#4A6741", "#7FB069", "#A8E6CF"],
        preset: EffectPreset::Subtle,
    },
    Builtin {
        name: "learning_accessible",
        description: "Violet on neutral gray, high contrast for easy reading.",
        colors: ["#6C5CE7", "#A29BFE", "#2D3436", "#636E72", "#74B9FF", "#6C5CE7"],
        preset: EffectPreset::Moderate,
    },
    Builtin {
        name: "professional_minimal",
        description: "Charcoal type on a near-white page with a single blue accent.",
        colors: ["#2F3542", "#57606F", "#F8F9FA", "#E9ECEF", "#3742FA", "#2F3542"],
        preset: EffectPreset::Subtle,
    },
    Builtin {
        name: "professional_positive",
        description: "Mint and cyan on pale lavender for good-news reports.",
        colors: ["#00B894", "#00CEC9", "#DDD6FE", "#E0E7FF", "#0984E3", "#00B894"],
        preset: EffectPreset::Moderate,
    },
    Builtin {
        name: "professional_subtle",
        description: "Muted grays with a faint blue accent.",
        colors: ["#636E72", "#B2BEC3", "#2D3436", "#636E72", "#74B9FF", "#636E72"],
        preset: EffectPreset::Subtle,
    },
    Builtin {
        name: "professional_sophisticated",
        description: "Near-black with a gold accent for dense expert material.",
        colors: ["#2D3436", "#636E72", "#1A1A1A", "#2D3436", "#FDCB6E", "#2D3436"],
        preset: EffectPreset::Moderate,
    },
    Builtin {
        name: "emotional_vibrant",
        description: "Warm coral and yellow over violet.",
        colors: ["#FF7675", "#FDCB6E", "#6C5CE7", "#A29BFE", "#FD79A8", "#FF7675"],
        preset: EffectPreset::Vibrant,
    },
    Builtin {
        name: "emotional_serene",
        description: "Aqua and sky blue on slate.",
        colors: ["#81ECEC", "#74B9FF", "#2D3436", "#636E72", "#00B894", "#81ECEC"],
        preset: EffectPreset::Subtle,
    },
    Builtin {
        name: "emotional_contemplative",
        description: "Lavender and indigo on slate for reflective passages.",
        colors: ["#A29BFE", "#6C5CE7", "#2D3436", "#636E72", "#74B9FF", "#A29BFE"],
        preset: EffectPreset::Subtle,
    },
];

fn find(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Colors of a builtin theme.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_palette(name: &str) -> Option<ColorScheme> {
    find(name).map(|b| ColorScheme::from_array(b.colors))
}

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized. Every builtin is declared
/// compatible with the typewriter template only.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<ThemeConfig> {
    let b = find(name)?;
    let typography = match name.split('_').next() {
        Some("learning") => Typography::learning(),
        Some("professional") => Typography::professional(),
        _ => Typography::default(),
    };
    Some(ThemeConfig {
        name: display_name(name),
        description: b.description.to_string(),
        colors: ColorScheme::from_array(b.colors),
        effects: b.preset.effect(),
        typography,
        compatibility: vec![crate::effects::TYPEWRITER.to_string()],
    })
}

/// List all available builtin theme names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &[
        "learning_focused",
        "learning_energetic",
        "learning_supportive",
        "learning_accessible",
        "professional_minimal",
        "professional_positive",
        "professional_subtle",
        "professional_sophisticated",
        "emotional_vibrant",
        "emotional_serene",
        "emotional_contemplative",
    ]
}

/// `learning_focused` becomes `Learning Focused`.
fn display_name(id: &str) -> String {
    id.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
