//! The named-theme identifier space the generator selects from.
//!
//! Identifiers are free-form strings. The builtin set uses
//! `{family}_{variant}`, and the family prefix decides the
//! [`ThemeCategory`] of any identifier, builtin or not.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tinct_analysis::{ContentProfile, ContentType, DifficultyLevel, EmotionType};
use tracing::debug;

use crate::builtin::{builtin_names, builtin_theme};
use crate::error::ThemeError;
use crate::scheme::ThemeConfig;

/// Most candidates [`ThemeRegistry::find_for_profile`] returns.
pub const MAX_CANDIDATES: usize = 3;

// ---------------------------------------------------------------------------
// Category + info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    Learning,
    Professional,
    Emotional,
    Custom,
}

impl ThemeCategory {
    /// Category from the identifier prefix.
    #[must_use]
    pub fn of(id: &str) -> Self {
        if id.starts_with("learning") {
            Self::Learning
        } else if id.starts_with("professional") {
            Self::Professional
        } else if id.starts_with("emotional") {
            Self::Emotional
        } else {
            Self::Custom
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Professional => "professional",
            Self::Emotional => "emotional",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Listing entry for one registered theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ThemeCategory,
    pub compatibility: Vec<String>,
}

// ---------------------------------------------------------------------------
// ThemeRegistry
// ---------------------------------------------------------------------------

/// Validated themes keyed by identifier, iterated in identifier order.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, ThemeConfig>,
}

impl ThemeRegistry {
    /// An empty registry. The generator then always synthesizes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every builtin theme.
    #[must_use]
    pub fn builtin() -> Self {
        let themes = builtin_names()
            .iter()
            .filter_map(|&id| builtin_theme(id).map(|theme| (id.to_string(), theme)))
            .collect();
        Self { themes }
    }

    /// Register `theme` under `id`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::EmptyName`] for a blank id, [`ThemeError::DuplicateTheme`]
    /// when `id` is taken, or the theme's own validation error.
    pub fn insert(&mut self, id: impl Into<String>, theme: ThemeConfig) -> Result<(), ThemeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ThemeError::EmptyName);
        }
        if self.themes.contains_key(&id) {
            return Err(ThemeError::DuplicateTheme(id));
        }
        theme.validate()?;
        debug!(id = %id, category = %ThemeCategory::of(&id), "theme registered");
        self.themes.insert(id, theme);
        Ok(())
    }

    /// Remove and return the theme registered under `id`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::UnknownTheme`] when nothing is registered under `id`.
    pub fn remove(&mut self, id: &str) -> Result<ThemeConfig, ThemeError> {
        self.themes
            .remove(id)
            .ok_or_else(|| ThemeError::UnknownTheme(id.to_string()))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ThemeConfig> {
        self.themes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn names_in_category(&self, category: ThemeCategory) -> impl Iterator<Item = &str> {
        self.names().filter(move |id| ThemeCategory::of(id) == category)
    }

    #[must_use]
    pub fn info(&self, id: &str) -> Option<ThemeInfo> {
        let theme = self.themes.get(id)?;
        Some(ThemeInfo {
            id: id.to_string(),
            name: theme.name.clone(),
            description: theme.description.clone(),
            category: ThemeCategory::of(id),
            compatibility: theme.compatibility.clone(),
        })
    }

    /// Up to [`MAX_CANDIDATES`] registered theme ids suited to `profile`,
    /// best first.
    ///
    /// Content type decides the family; emotion (or difficulty, for
    /// learning) decides the preferred variant. Ids that are not registered
    /// are skipped.
    #[must_use]
    pub fn find_for_profile(&self, profile: &ContentProfile) -> Vec<&str> {
        let ranked: Vec<&str> = match profile.content_type {
            ContentType::Learning => {
                let first = match profile.difficulty {
                    DifficultyLevel::Easy | DifficultyLevel::Medium => "learning_energetic",
                    DifficultyLevel::Hard | DifficultyLevel::Expert => "learning_focused",
                };
                vec![first, "learning_focused", "learning_energetic"]
            }
            ContentType::Professional => {
                let first = match profile.emotion {
                    EmotionType::Happy | EmotionType::Excited => "professional_positive",
                    _ => "professional_minimal",
                };
                vec![first, "professional_minimal", "professional_positive"]
            }
            // Technical text has no preferred variant, only the fallbacks.
            ContentType::Technical => vec!["emotional_serene", "emotional_vibrant"],
            ContentType::Entertainment | ContentType::Narrative | ContentType::Creative => {
                let first = match profile.emotion {
                    EmotionType::Calm | EmotionType::Neutral => "emotional_serene",
                    _ => "emotional_vibrant",
                };
                vec![first, "emotional_serene", "emotional_vibrant"]
            }
        };

        let mut out: Vec<&str> = Vec::with_capacity(MAX_CANDIDATES);
        for (key, _) in ranked.into_iter().filter_map(|id| self.themes.get_key_value(id)) {
            if !out.contains(&key.as_str()) {
                out.push(key.as_str());
            }
        }
        out.truncate(MAX_CANDIDATES);
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
