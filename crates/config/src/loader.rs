//! Settings loader
//!
//! Reads an optional JSON settings file, then applies `REATTEMPT_*`
//! environment overrides on top of it.

use crate::settings::{DelaySetting, RetrySettings, TimesSetting};
use reattempt_core::{
    Error, Result, REATTEMPT_CONFIG_VAR, REATTEMPT_DELAY_MS_VAR, REATTEMPT_JITTER_VAR,
    REATTEMPT_TIMES_VAR,
};
use std::path::{Path, PathBuf};

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Loader for [`RetrySettings`]
pub struct ConfigLoader {
    /// Settings file; falls back to `REATTEMPT_CONFIG` when unset
    file: Option<PathBuf>,
    /// Whether environment overrides are applied
    read_env: bool,
    lookup: EnvLookup,
}

impl ConfigLoader {
    /// Create a loader reading the process environment
    pub fn new() -> Self {
        Self {
            file: None,
            read_env: true,
            lookup: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Read settings from this JSON file
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Ignore `REATTEMPT_*` environment variables
    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Resolve environment variables through `lookup` instead of the process environment
    pub fn env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Box::new(lookup);
        self
    }

    /// Load the settings
    pub fn load(self) -> Result<RetrySettings> {
        let file = self.file.clone().or_else(|| {
            if self.read_env {
                self.var(REATTEMPT_CONFIG_VAR).map(PathBuf::from)
            } else {
                None
            }
        });

        let mut settings = match file {
            Some(path) => read_settings_file(&path)?,
            None => RetrySettings::default(),
        };

        if self.read_env {
            self.apply_env(&mut settings)?;
        }

        tracing::debug!(
            times = ?settings.times,
            delay = ?settings.delay,
            jitter = settings.jitter,
            "resolved retry settings"
        );
        Ok(settings)
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    fn apply_env(&self, settings: &mut RetrySettings) -> Result<()> {
        if let Some(times) = self.var(REATTEMPT_TIMES_VAR) {
            settings.times = Some(times.parse::<TimesSetting>()?);
        }

        if let Some(delay) = self.var(REATTEMPT_DELAY_MS_VAR) {
            let ms = delay.trim().parse::<u64>().map_err(|e| {
                Error::invalid_value(REATTEMPT_DELAY_MS_VAR, &delay, format!("expected milliseconds: {e}"))
            })?;
            settings.delay = Some(DelaySetting::Fixed { ms });
        }

        if let Some(jitter) = self.var(REATTEMPT_JITTER_VAR) {
            settings.jitter = parse_flag(REATTEMPT_JITTER_VAR, &jitter)?;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_settings_file(path: &Path) -> Result<RetrySettings> {
    tracing::debug!(path = %path.display(), "loading retry settings");
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system(path, "read settings", e))?;
    serde_json::from_str(&text).map_err(|e| {
        Error::json(
            format!("invalid retry settings in '{}'", path.display()),
            e,
        )
    })
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_value(
            field,
            value,
            "expected true/false, yes/no, on/off or 1/0",
        )),
    }
}
