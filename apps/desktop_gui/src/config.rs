use std::{fs, path::PathBuf};

use anyhow::Context;
use client_core::DEFAULT_SERVICE_URL;
use serde::Deserialize;
use url::Url;

pub const CONFIG_FILE_NAME: &str = "filepilot.toml";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_PREVIEW_LIMIT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub log_filter: String,
    pub preview_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_url: Option<String>,
    log_filter: Option<String>,
    preview_limit: Option<usize>,
}

/// Settings plus anything worth reporting once logging is up. Loading runs
/// before the subscriber exists, so warnings are carried rather than emitted.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

pub fn load_settings() -> LoadedSettings {
    let mut warnings = Vec::new();
    let file = match read_config_file() {
        Ok(file) => file,
        Err(err) => {
            warnings.push(format!("{err:#}"));
            None
        }
    };

    let (source, raw) = match file {
        Some((path, raw)) => (Some(path), Some(raw)),
        None => (None, None),
    };
    let (settings, mut more) = load_settings_from(raw.as_deref(), |key| std::env::var(key).ok());
    warnings.append(&mut more);

    LoadedSettings {
        settings,
        source,
        warnings,
    }
}

/// Applies the file contents (if any) on top of the defaults. The service
/// address is the only setting the environment may override.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    if let Some(raw) = file_contents {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.service_url {
                    settings.service_url = v;
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
                if let Some(v) = file_cfg.preview_limit {
                    settings.preview_limit = v;
                }
            }
            Err(err) => warnings.push(format!("ignoring unreadable {CONFIG_FILE_NAME}: {err}")),
        }
    }

    if let Some(v) = env("FILEPILOT_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    match normalize_service_url(&settings.service_url) {
        Ok(url) => settings.service_url = url,
        Err(err) => {
            warnings.push(format!("{err:#}; falling back to {DEFAULT_SERVICE_URL}"));
            settings.service_url = DEFAULT_SERVICE_URL.into();
        }
    }
    if settings.log_filter.trim().is_empty() {
        settings.log_filter = DEFAULT_LOG_FILTER.into();
    }

    (settings, warnings)
}

pub fn normalize_service_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).with_context(|| format!("invalid service url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("service url '{trimmed}' must use http or https");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("filepilot").join(CONFIG_FILE_NAME));
    }
    candidates
}

fn read_config_file() -> anyhow::Result<Option<(PathBuf, String)>> {
    for path in config_file_candidates() {
        if !path.is_file() {
            continue;
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        return Ok(Some((path, raw)));
    }
    Ok(None)
}
