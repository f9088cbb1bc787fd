//! Environment-driven settings. The command line is reserved for arguments
//! forwarded to Gradle, so everything configurable lives here.

use crate::e_reports::{report_path_in, DEFAULT_CONTEXT_RADIUS, DEFAULT_REPORT_DIR};
use std::path::PathBuf;

pub const ENV_WRAPPER: &str = "GRADLE_PRETTY_WRAPPER";
pub const ENV_REPORT: &str = "GRADLE_PRETTY_REPORT";
pub const ENV_REPORT_DIR: &str = "GRADLE_PRETTY_REPORT_DIR";
pub const ENV_CONTEXT: &str = "GRADLE_PRETTY_CONTEXT";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// When to write the error report after a failed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Ask,
    Always,
    Never,
}

impl ReportMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ask" | "" => Some(ReportMode::Ask),
            "always" | "yes" | "y" | "1" => Some(ReportMode::Always),
            "never" | "no" | "n" | "0" => Some(ReportMode::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit wrapper command; `None` means look for `./gradlew`, then `gradle`.
    pub wrapper: Option<PathBuf>,
    pub report_mode: ReportMode,
    pub report_dir: PathBuf,
    pub context_radius: usize,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            wrapper: None,
            report_mode: ReportMode::Ask,
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            context_radius: DEFAULT_CONTEXT_RADIUS,
            color: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Bad values keep the default and log a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(wrapper) = lookup(ENV_WRAPPER).filter(|w| !w.trim().is_empty()) {
            settings.wrapper = Some(PathBuf::from(wrapper));
        }
        if let Some(mode) = lookup(ENV_REPORT) {
            match ReportMode::parse(&mode) {
                Some(mode) => settings.report_mode = mode,
                None => log::warn!("ignoring {}={:?}: expected ask, always or never", ENV_REPORT, mode),
            }
        }
        if let Some(dir) = lookup(ENV_REPORT_DIR).filter(|d| !d.trim().is_empty()) {
            settings.report_dir = PathBuf::from(dir);
        }
        if let Some(radius) = lookup(ENV_CONTEXT) {
            match radius.trim().parse() {
                Ok(radius) => settings.context_radius = radius,
                Err(e) => log::warn!("ignoring {}={:?}: {}", ENV_CONTEXT, radius, e),
            }
        }
        // https://no-color.org: any non-empty value disables color
        if lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            settings.color = false;
        }

        log::debug!("settings: {:?}", settings);
        settings
    }

    pub fn report_path(&self) -> PathBuf {
        report_path_in(&self.report_dir)
    }
}
