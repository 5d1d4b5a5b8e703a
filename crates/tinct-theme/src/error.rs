use thiserror::Error;

/// Errors raised when building or registering themes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    #[error("color `{role}` must be #RRGGBB, got `{value}`")]
    InvalidColor { role: &'static str, value: String },

    #[error("effect `{field}` out of range: {value}")]
    InvalidEffect { field: &'static str, value: f64 },

    #[error("theme name must not be empty")]
    EmptyName,

    #[error("theme `{0}` is already registered")]
    DuplicateTheme(String),

    #[error("no theme named `{0}`")]
    UnknownTheme(String),
}
