use crate::e_fmt::home_dir;
use crate::FileErrorGroup;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_DIR: &str = "build/reports/gradle_errors";
pub const REPORT_FILE_NAME: &str = "gradle_errors_report.txt";
pub const DEFAULT_CONTEXT_RADIUS: usize = 2;

/// `<dir>/gradle_errors_report.txt`
pub fn report_path_in(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(REPORT_FILE_NAME)
}

/// Writes compiler errors to a plain text file, each file section followed by
/// numbered source excerpts around the reported lines.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    context_radius: usize,
    home: Option<String>,
    generated_at: Option<DateTime<Local>>,
}

impl Default for ReportWriter {
    fn default() -> Self {
        ReportWriter {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            home: home_dir(),
            generated_at: None,
        }
    }
}

impl ReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_home(mut self, home: Option<String>) -> Self {
        self.home = home.filter(|h| !h.is_empty());
        self
    }

    /// Fixes the header timestamp instead of reading the clock at render time.
    pub fn with_timestamp(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Renders and writes the report to `destination`, creating parent directories.
    ///
    /// Unreadable source files only degrade their own section; the sole error
    /// returned is failing to create the directory or write the file.
    pub fn write(&self, groups: &[FileErrorGroup], destination: &Path) -> Result<PathBuf> {
        let report = self.render(groups);
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create report directory {}", parent.display())
            })?;
        }
        fs::write(destination, report)
            .with_context(|| format!("failed to write report {}", destination.display()))?;
        log::info!(
            "wrote report for {} file(s) to {}",
            groups.len(),
            destination.display()
        );
        Ok(destination.to_path_buf())
    }

    /// The full report text.
    pub fn render(&self, groups: &[FileErrorGroup]) -> String {
        let now = self
            .generated_at
            .unwrap_or_else(Local::now)
            .format("%Y-%m-%d %H:%M:%S");
        let mut lines = vec![
            format!("Gradle Kotlin Compilation Errors Report - {}\n", now),
            format!("{}\n", "=".repeat(80)),
        ];
        for group in groups {
            self.render_group(group, &mut lines);
        }
        lines.join("\n")
    }

    fn render_group(&self, group: &FileErrorGroup, lines: &mut Vec<String>) {
        lines.push(format!("\n📄 {}", self.shorten(&group.path)));
        for entry in &group.entries {
            lines.push(format!(
                "  → Line {}:{}: {}",
                entry.line, entry.col, entry.message
            ));
        }
        lines.push(format!("{}\n", "-".repeat(80)));

        let real_path = group.path.strip_prefix("file://").unwrap_or(&group.path);
        match fs::read_to_string(real_path) {
            Ok(source) => {
                let source: Vec<&str> = source.lines().collect();
                let error_lines: BTreeSet<usize> =
                    group.entries.iter().map(|e| e.line as usize).collect();
                for line in error_lines {
                    lines.push(format!("⚠ Context around line {}:\n", line));
                    lines.extend(excerpt(&source, line, self.context_radius));
                    lines.push("\n".to_string());
                }
            }
            Err(e) => {
                log::debug!("cannot read {}: {}", real_path, e);
                lines.push(format!("[Could not read file: {}]\n", e));
            }
        }

        lines.push(format!("{}\n", "=".repeat(80)));
    }

    fn shorten(&self, path: &str) -> String {
        match &self.home {
            Some(home) => path.replace(home.as_str(), "~"),
            None => path.to_string(),
        }
    }
}

/// Numbered lines `[max(1, line - radius), min(len, line + radius)]`, the
/// reported line marked with `>>`.
pub fn excerpt(source: &[&str], line: usize, radius: usize) -> Vec<String> {
    let start = line.saturating_sub(radius).max(1);
    let end = source.len().min(line.saturating_add(radius));
    (start..=end)
        .map(|n| {
            let marker = if n == line { ">>" } else { "  " };
            format!("{} {:>4} | {}", marker, n, source[n - 1].trim_end())
        })
        .collect()
}
