use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use move_input::InputSettings;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub just_selected_ms: u64,
    /// Overrides the script's keyboard flag when set.
    pub keyboard: Option<bool>,
    pub log_filter: String,
    pub queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            just_selected_ms: 500,
            keyboard: None,
            log_filter: "info".into(),
            queue_capacity: 64,
        }
    }
}

impl Settings {
    pub fn input(&self) -> InputSettings {
        InputSettings {
            just_selected_window: Duration::from_millis(self.just_selected_ms),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    just_selected_ms: Option<u64>,
    keyboard: Option<bool>,
    log_filter: Option<String>,
    queue_capacity: Option<usize>,
}

/// Defaults, then `path` if it exists, then `REPLAY__*` environment
/// overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config '{}'", path.display()))
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.just_selected_ms {
        settings.just_selected_ms = v;
    }
    if let Some(v) = file_cfg.keyboard {
        settings.keyboard = Some(v);
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.queue_capacity {
        settings.queue_capacity = v.max(1);
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("REPLAY__JUST_SELECTED_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.just_selected_ms = parsed;
        }
    }
    if let Some(v) = var("REPLAY__KEYBOARD") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.keyboard = Some(parsed);
        }
    }
    if let Some(v) = var("REPLAY__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
