use crate::{Block, Diagnostic, FileErrorGroup, StyleTag};
use std::time::Duration;

const SUMMARY_RULE: &str = "──────────────────────────────";

/// Turns diagnostics into display blocks.
///
/// Blocks for task headers, generic errors and build banners are produced
/// as each diagnostic arrives; compiler errors only show up in [`summary`](Self::summary).
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    home: Option<String>,
}

impl ReportFormatter {
    /// A formatter that shortens paths under the current user's home directory.
    pub fn new() -> Self {
        Self::with_home(home_dir())
    }

    pub fn with_home(home: Option<String>) -> Self {
        ReportFormatter {
            home: home.filter(|h| !h.is_empty()),
        }
    }

    /// The immediate block for `diagnostic`, if it has one.
    pub fn format(&self, diagnostic: &Diagnostic) -> Option<Block> {
        match diagnostic {
            Diagnostic::TaskHeader { name, failed } => {
                let (style, status) = if *failed {
                    (StyleTag::Failure, "FAILED")
                } else {
                    (StyleTag::Success, "OK")
                };
                Some(Block::new(style, format!("\n❯ Task: {} {}", name, status)))
            }
            Diagnostic::GenericError { message } => {
                Some(Block::new(StyleTag::Failure, message.clone()))
            }
            Diagnostic::BuildStatus { succeeded: true } => {
                Some(Block::new(StyleTag::Success, "\n✔ BUILD SUCCESSFUL"))
            }
            Diagnostic::BuildStatus { succeeded: false } => {
                Some(Block::new(StyleTag::Failure, "\n✖ BUILD FAILED"))
            }
            Diagnostic::CompilerError { .. } | Diagnostic::Other { .. } => None,
        }
    }

    /// Trailing per-file listing of compiler errors. Empty when there are no groups.
    pub fn summary(&self, groups: &[FileErrorGroup]) -> Vec<Block> {
        if groups.is_empty() {
            return Vec::new();
        }
        let mut blocks = vec![
            Block::new(StyleTag::Dim, format!("\n{}", SUMMARY_RULE)),
            Block::new(StyleTag::Warning, "⚠ Kotlin compilation errors:"),
        ];
        for group in groups {
            blocks.push(Block::new(
                StyleTag::Info,
                format!("\n📂 {}", self.shorten_path(&group.path)),
            ));
            for entry in &group.entries {
                blocks.push(Block::new(
                    StyleTag::Failure,
                    format!("   → L{}:{} {}", entry.line, entry.col, entry.message),
                ));
            }
        }
        blocks.push(Block::new(StyleTag::Dim, SUMMARY_RULE));
        blocks
    }

    /// Replaces the home directory with `~`. Paths outside home are returned as-is.
    pub fn shorten_path(&self, path: &str) -> String {
        match &self.home {
            Some(home) => path.replace(home.as_str(), "~"),
            None => path.to_string(),
        }
    }
}

/// The current user's home directory, from `HOME` (or `USERPROFILE` on Windows).
pub fn home_dir() -> Option<String> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var(var).ok().filter(|h| !h.is_empty())
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// Helper: seconds with two decimals for short runs, clock format past a minute.
pub fn format_duration_secs(d: Duration) -> String {
    if d.as_secs() >= 60 {
        return format_duration(d);
    }
    format!("{:.2}s", d.as_secs_f64())
}
