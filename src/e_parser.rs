use crate::Diagnostic;
use once_cell::sync::Lazy;
use regex::Regex;

static TASK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^> Task\s*:(.*)$").expect("task header regex"));

// The path capture is greedy, so a path containing `:N:M` keeps the last pair.
static COMPILER_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^e:\s*(file:///.+):(\d+):(\d+)\s*(.*)$").expect("compiler error regex")
});

/// Classifies one raw line of build output.
///
/// Classification is total: unrecognised lines become [`Diagnostic::Other`].
/// When a line carries both build status banners only the first (success) is
/// returned here; use [`classify_all`] to get every diagnostic of a line.
///
/// # Example
/// ```
/// use gradle_pretty::{classify, Diagnostic};
///
/// let d = classify("e: file:///a/b.kt:12:5 unexpected token");
/// assert_eq!(
///     d,
///     Diagnostic::CompilerError {
///         path: "file:///a/b.kt".to_string(),
///         line: 12,
///         col: 5,
///         message: "unexpected token".to_string(),
///     }
/// );
/// ```
pub fn classify(line: &str) -> Diagnostic {
    classify_all(line)
        .into_iter()
        .next()
        .unwrap_or_else(|| Diagnostic::Other {
            raw: line.to_string(),
        })
}

/// Returns every diagnostic produced by `line`, in rule order.
///
/// This is a single element for everything except lines that contain both
/// `BUILD SUCCESSFUL` and `BUILD FAILED`, which yield both banners.
pub fn classify_all(line: &str) -> Vec<Diagnostic> {
    let stripped = line.trim();

    if let Some(caps) = TASK_HEADER.captures(stripped) {
        let name = caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        return vec![Diagnostic::TaskHeader {
            name,
            failed: stripped.contains("FAILED"),
        }];
    }

    if let Some(diag) = parse_compiler_error(stripped) {
        return vec![diag];
    }

    if let Some(rest) = stripped.strip_prefix("e: ") {
        return vec![Diagnostic::GenericError {
            message: rest.to_string(),
        }];
    }

    let mut found = Vec::new();
    if stripped.contains("BUILD SUCCESSFUL") {
        found.push(Diagnostic::BuildStatus { succeeded: true });
    }
    if stripped.contains("BUILD FAILED") {
        found.push(Diagnostic::BuildStatus { succeeded: false });
    }
    if found.is_empty() {
        log::trace!("unclassified line: {:?}", line);
        found.push(Diagnostic::Other {
            raw: line.to_string(),
        });
    }
    found
}

/// Matches the strict `e: file://<path>:<line>:<col> <message>` shape.
/// Line and column must be positive and fit in a `u32`.
fn parse_compiler_error(stripped: &str) -> Option<Diagnostic> {
    let caps = COMPILER_ERROR.captures(stripped)?;
    let line: u32 = caps[2].parse().ok()?;
    let col: u32 = caps[3].parse().ok()?;
    if line == 0 || col == 0 {
        return None;
    }
    Some(Diagnostic::CompilerError {
        path: caps[1].to_string(),
        line,
        col,
        message: caps[4].to_string(),
    })
}
