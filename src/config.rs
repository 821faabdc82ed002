//! Host configuration parsed from environment variables.

use std::str::FromStr;
use std::time::Duration;

use canvas::EditorConfig;

pub const DEFAULT_AUTOSAVE_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set to something that does not parse.
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub editor: EditorConfig,
    pub autosave_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { editor: EditorConfig::default(), autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_MS) }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `JOURNAL_HISTORY_CAP`: undo entries kept, default 20
    /// - `JOURNAL_ROTATE_STEP_DEG`: degrees per wheel tick or nudge, default 5
    /// - `JOURNAL_SCALE_STEP`: scale points per wheel tick or nudge, default 5
    /// - `JOURNAL_AUTOSAVE_MS`: quiet period before a write, default 500
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a variable is set but unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut editor = EditorConfig::default();
        if let Some(cap) = parse_var(&lookup, "JOURNAL_HISTORY_CAP")? {
            editor.history_cap = cap;
        }
        if let Some(step) = parse_var(&lookup, "JOURNAL_ROTATE_STEP_DEG")? {
            editor.rotate_step_deg = step;
        }
        if let Some(step) = parse_var(&lookup, "JOURNAL_SCALE_STEP")? {
            editor.scale_step = step;
        }
        let autosave_ms = parse_var(&lookup, "JOURNAL_AUTOSAVE_MS")?.unwrap_or(DEFAULT_AUTOSAVE_MS);

        Ok(Self { editor: editor.sanitized(), autosave_delay: Duration::from_millis(autosave_ms) })
    }
}

/// Unset and blank variables are `None`.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<T>().map(Some).map_err(|_| ConfigError::Parse { var, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
